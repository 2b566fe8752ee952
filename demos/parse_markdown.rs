//! Parse a Bilingual Document
//!
//! Parses a short English/Vietnamese story and prints the result as JSON.
//!
//! ```bash
//! cargo run --example parse_markdown
//! RUST_LOG=segmark=trace cargo run --example parse_markdown -- phrase
//! ```

use std::sync::Arc;

use segmark::{Origin, Parser, SequentialIds};
use tracing_subscriber::EnvFilter;

const STORY: &str = r#"Here is your story:

# The Lost Key / Chìa Khóa Bị Mất

## Chapter 1 / Chương 1
It was dark. {Trời tối.} Mr. Lee waited by the door. {Ông Lee đợi bên cửa.}

"Who is there?" he asked.[1] {"Ai đó?" ông hỏi.}

## Chapter 2 / Chương 2
The door opened, and the wind rushed in. {Cánh cửa mở ra, và gió ùa vào.}
"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let descriptor = match std::env::args().nth(1).as_deref() {
        Some("phrase") => "en-vi-ph",
        Some("mono") => "en",
        _ => "en-vi",
    };
    let origin: Origin = descriptor.parse()?;

    let parser = Parser::new(Arc::new(SequentialIds::new("demo")));
    let doc = parser.parse_document(STORY, &origin);

    eprintln!("Origin: {origin}");
    for chapter in &doc.chapters {
        eprintln!(
            "  [{}] {:?}: {} segments, {} words, ~{} min",
            chapter.order,
            chapter.title.get(origin.primary()),
            chapter.stats.total_segments,
            chapter.stats.total_words,
            chapter.stats.estimated_reading_time,
        );
    }

    println!("{}", serde_json::to_string_pretty(&doc)?);
    Ok(())
}
