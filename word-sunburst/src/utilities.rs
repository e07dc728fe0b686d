use std::io::{self, BufRead, Write};

/// Prompts on stdout and reads one line from stdin. `None` once stdin is closed.
pub fn input(prompt: &str) -> io::Result<Option<String>> {
    print!("{prompt}");
    io::stdout().flush()?;
    read_line(&mut io::stdin().lock())
}

fn read_line(reader: &mut impl BufRead) -> io::Result<Option<String>> {
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}

pub fn str_to_bool(mut str: String) -> Option<bool> {
    str.make_ascii_lowercase();
    match str.trim() {
        "y" | "yes" | "yeah" | "yea" | "true" | "on" => Some(true),
        "n" | "no" | "nope" | "false" | "off" => Some(false),
        _ => None,
    }
}

/// The known command closest to `typed`, if any is close enough.
pub fn closest_command<'a>(typed: &str, commands: &[&'a str]) -> Option<&'a str> {
    commands
        .iter()
        .map(|command| (*command, strsim::jaro(command, typed)))
        .filter(|(_, score)| *score > 0.8)
        .max_by(|(_, a), (_, b)| a.total_cmp(b))
        .map(|(command, _)| command)
}
