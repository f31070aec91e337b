use std::collections::HashMap;

use crate::constant::TERMINATOR;
use crate::matcher::model::*;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// Matches raw Cli tokens against the registered option strings.
///
/// Tokens are fed one at a time; each option opens a buffer which collects its values until the bound is satisfied.
/// Anything which isn't claimed by an option is tracked (with its offset) as unrecognized.
#[derive(Debug)]
pub(crate) struct TokenMatcher<'a> {
    options: &'a HashMap<String, OptionConfig>,
    negative_number_options: bool,
    fed: usize,
    terminated: bool,
    matches: Vec<MatchTokens>,
    unrecognized: Vec<OffsetValue>,
    buffer: Option<MatchBuffer>,
}

impl<'a> TokenMatcher<'a> {
    pub(crate) fn new(
        options: &'a HashMap<String, OptionConfig>,
        negative_number_options: bool,
    ) -> Self {
        Self {
            options,
            negative_number_options,
            fed: 0,
            terminated: false,
            matches: Vec::default(),
            unrecognized: Vec::default(),
            buffer: None,
        }
    }

    pub(crate) fn feed(&mut self, token: &str) -> Result<(), MatchError> {
        let result = self.dispatch(token);
        self.fed += token.len();
        result
    }

    /// Whether the option at `index` has been matched so far, including an option still collecting values.
    pub(crate) fn contains(&self, index: usize) -> bool {
        self.matches.iter().any(|mt| mt.index == index)
            || self
                .buffer
                .as_ref()
                .map_or(false, |match_buffer| match_buffer.index() == index)
    }

    fn dispatch(&mut self, token: &str) -> Result<(), MatchError> {
        // 1. A remainder swallows everything, including options and the terminator.
        if let Some(match_buffer) = &mut self.buffer {
            if match_buffer.is_rest() {
                match_buffer.push(self.fed, token.to_string());
                return Ok(());
            }
        }

        // 2. Nothing after the terminator is matched.
        if self.terminated {
            self.unrecognized.push((self.fed, token.to_string()));
            return Ok(());
        }

        if token == TERMINATOR {
            self.update_buffer(None)?;
            self.terminated = true;
            self.unrecognized.push((self.fed, token.to_string()));
            return Ok(());
        }

        // 3. An option closes whatever came before it.
        if self.looks_like_option(token) {
            self.update_buffer(None)?;
            return self.match_option(token);
        }

        // 4. A value belongs to the open option, if there is one.
        match &mut self.buffer {
            Some(match_buffer) if match_buffer.is_open() => {
                match_buffer.push(self.fed, token.to_string());
            }
            _ => {
                self.update_buffer(None)?;
                self.unrecognized.push((self.fed, token.to_string()));
            }
        };

        Ok(())
    }

    fn looks_like_option(&self, token: &str) -> bool {
        if !token.starts_with('-') {
            return false;
        }

        if self.options.contains_key(token) {
            return true;
        }

        if token.len() == 1 {
            return false;
        }

        if let Some((option_string, _)) = token.split_once('=') {
            if self.options.contains_key(option_string) {
                return true;
            }
        }

        if looks_like_negative_number(token) && !self.negative_number_options {
            return false;
        }

        !token.contains(' ')
    }

    fn match_option(&mut self, token: &str) -> Result<(), MatchError> {
        let options = self.options;

        // 1. Find an exact option string, such as:
        //  --initial
        //  -i
        if let Some(config) = options.get(token) {
            return self.open(config, None);
        }

        // 2. Find an equals delimited option string, such as:
        //  --initial=..
        //  -i=..
        if let Some((option_string, value)) = token.split_once('=') {
            if let Some(config) = options.get(option_string) {
                return self.open(config, Some((self.fed + option_string.len() + 1, value)));
            }
        }

        // 3. Find combined short option strings, such as (both -i and -v are example short options):
        //  -i..
        //  -iv
        //  -iv..
        //  -iv=..
        if !token.starts_with("--") {
            if let Some(result) = self.match_short_cluster(token) {
                return result;
            }
        }

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Unrecognized option '{token}'.");
        }
        self.unrecognized.push((self.fed, token.to_string()));
        Ok(())
    }

    fn match_short_cluster(&mut self, token: &str) -> Option<Result<(), MatchError>> {
        let options = self.options;
        let mut rest = token.strip_prefix('-')?;
        let (mut config, mut width) = lookup_short(options, rest)?;
        // Resolve the whole cluster before opening any of it.
        let mut resolved: Vec<(&OptionConfig, Option<(usize, &str)>)> = Vec::new();

        loop {
            let tail = &rest[width..];

            if tail.is_empty() {
                resolved.push((config, None));
                break;
            }

            if config.bound().accepts_values() {
                // Only the final short option may take the remaining characters as its value.
                let value = tail.strip_prefix('=').unwrap_or(tail);
                resolved.push((config, Some((self.fed + token.len() - value.len(), value))));
                break;
            }

            match lookup_short(options, tail) {
                Some((next, next_width)) => {
                    resolved.push((config, None));
                    config = next;
                    width = next_width;
                    rest = tail;
                }
                None => {
                    return Some(Err(MatchError::IgnoredExplicit(
                        config.display().to_string(),
                        tail.to_string(),
                    )));
                }
            }
        }

        for (config, explicit) in resolved {
            if let Err(error) = self.open(config, explicit) {
                return Some(Err(error));
            }
        }

        Some(Ok(()))
    }

    fn open(
        &mut self,
        config: &OptionConfig,
        explicit: Option<(usize, &str)>,
    ) -> Result<(), MatchError> {
        let mut match_buffer = MatchBuffer::new(config);

        match explicit {
            Some((offset, value)) => {
                if !config.bound().accepts_values() {
                    return Err(MatchError::IgnoredExplicit(
                        config.display().to_string(),
                        value.to_string(),
                    ));
                }

                match_buffer.push(offset, value.to_string());
                // Options using k=v syntax cannot follow up with more values afterwards.
                self.update_buffer(None)?;
                self.matches.push(match_buffer.close()?);
                Ok(())
            }
            None => self.update_buffer(Some(match_buffer)),
        }
    }

    fn update_buffer(&mut self, next_buffer: Option<MatchBuffer>) -> Result<(), MatchError> {
        if let Some(match_buffer) = std::mem::replace(&mut self.buffer, next_buffer) {
            let match_tokens = match_buffer.close()?;
            self.matches.push(match_tokens);
        }

        Ok(())
    }

    pub(crate) fn close(mut self) -> Result<Matched, (usize, MatchError, Matched)> {
        let result = self.update_buffer(None);
        let matched = Matched {
            values: self.matches,
            unrecognized: self.unrecognized,
        };

        match result {
            Ok(()) => Ok(matched),
            Err(error) => Err((self.fed, error, matched)),
        }
    }
}

fn lookup_short<'a>(
    options: &'a HashMap<String, OptionConfig>,
    rest: &str,
) -> Option<(&'a OptionConfig, usize)> {
    let head = rest.chars().next()?;
    options
        .get(&format!("-{head}"))
        .map(|config| (config, head.len_utf8()))
}

/// Whether the token reads as a negative number, such as `-1` or `-.5`.
pub(crate) fn looks_like_negative_number(token: &str) -> bool {
    let digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());

    match token.strip_prefix('-') {
        Some(number) => match number.split_once('.') {
            Some((whole, fraction)) => !fraction.is_empty() && digits(whole) && digits(fraction),
            None => !number.is_empty() && digits(number),
        },
        None => false,
    }
}
