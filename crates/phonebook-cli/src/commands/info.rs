//! `phonebook info` command implementation

use crate::api::ApiClient;
use crate::error::Result;

/// Print the server's info page as plain text
pub async fn run(client: &ApiClient) -> Result<()> {
    let html = client.info().await?;
    println!("{}", html_to_text(&html));
    Ok(())
}

/// Drop markup, putting each closed block element on its own line
pub fn html_to_text(html: &str) -> String {
    let mut text = String::with_capacity(html.len());
    let mut in_tag = false;
    let mut tag = String::new();

    for c in html.chars() {
        match c {
            '<' => {
                in_tag = true;
                tag.clear();
            },
            '>' if in_tag => {
                in_tag = false;
                let name = tag.trim().to_ascii_lowercase();
                if matches!(name.as_str(), "/div" | "/p" | "/h1" | "br" | "br/" | "br /") {
                    text.push('\n');
                }
            },
            _ if in_tag => tag.push(c),
            _ => text.push(c),
        }
    }

    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
