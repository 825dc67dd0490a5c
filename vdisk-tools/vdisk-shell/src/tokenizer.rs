use crate::ShellError;

/// Rewrites the single-dash long form `-size=10` as `--size=10` and lower-cases option names.
/// Short flags and negative numbers are left alone.
pub fn normalize_argument(argument: &str) -> String {
    let body = if let Some(rest) = argument.strip_prefix("--") {
        rest
    } else if let Some(rest) = argument.strip_prefix('-') {
        match rest.chars().next() {
            Some(c) if c.is_ascii_alphabetic() && rest.len() > 1 => rest,
            _ => return argument.to_string(),
        }
    } else {
        return argument.to_string();
    };

    return match body.find('=') {
        Some(i) => format!("--{}{}", body[..i].to_ascii_lowercase(), &body[i..]),
        None => format!("--{}", body.to_ascii_lowercase()),
    };
}

/// Splits a command line on whitespace. Single or double quotes group words and are removed.
/// Lines starting with `#` are comments and produce no tokens.
pub fn tokenize(line: &str) -> Result<Vec<String>, ShellError> {
    if line.trim_start().starts_with('#') {
        return Ok(Vec::new());
    }

    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut quote: Option<char> = None;

    for ch in line.chars() {
        match quote {
            Some(q) if ch == q => quote = None,
            Some(_) => current.push(ch),
            None if ch == '"' || ch == '\'' => {
                quote = Some(ch);
                in_token = true;
            }
            None if ch.is_whitespace() => {
                if in_token {
                    tokens.push(current.clone());
                    current.clear();
                    in_token = false;
                }
            }
            None => {
                current.push(ch);
                in_token = true;
            }
        }
    }

    if quote.is_some() {
        return Err(ShellError::new("Unterminated quote"));
    }

    if in_token {
        tokens.push(current);
    }

    let mut result: Vec<String> = tokens.iter().map(|t| normalize_argument(t)).collect();

    // Command names are case-insensitive.
    if let Some(first) = result.first_mut() {
        *first = first.to_ascii_lowercase();
    }

    return Ok(result);
}
