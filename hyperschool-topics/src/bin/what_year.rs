use std::io::{self, BufRead};

use hyperschool_topics::date_match::check;

fn main() -> anyhow::Result<()> {
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    let line = line.trim_end_matches(|c: char| c == '\n' || c == '\r');

    match check(line) {
        Some(date) => println!("{}", date),
        None => println!("None"),
    }
    Ok(())
}
