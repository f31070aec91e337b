use qarg::{build_parser, Value};

fn main() {
    let parser = match build_parser(
        "n(name=world,t(times[int=1,s(shout@store_true,p(punctuation#?$...=.",
        Some("Greet someone, possibly more than once."),
    ) {
        Ok(parser) => parser,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    let namespace = parser.parse();
    let name = namespace.get("name").and_then(Value::as_str).unwrap_or("world");
    let times = namespace.get("times").and_then(Value::as_int).unwrap_or(1);
    let shout = namespace
        .get("shout")
        .and_then(Value::as_bool)
        .unwrap_or(false);
    let punctuation = namespace
        .get("punctuation")
        .and_then(Value::as_str)
        .unwrap_or(".");

    for _ in 0..times {
        let greeting = format!("Hello {name}{punctuation}");

        if shout {
            println!("{}", greeting.to_uppercase());
        } else {
            println!("{greeting}");
        }
    }
}
