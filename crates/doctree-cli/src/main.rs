//! DocTree CLI - Parse, validate, and inspect documentation comments
//!
//! Usage:
//!   dtcli [OPTIONS] <FILE>
//!
//! Commands:
//!   parse     Parse and display the comment tree (default)
//!   validate  Check the comment for markup faults
//!   stats     Show comment statistics

use std::env;
use std::fs;
use std::process;

use doctree_core::tree::{Attribute, Erroneous};
use doctree_core::{strip, BlockTag, DocComment, DocNode, DocParser, Markup, TagKind};
use serde::Serialize;

fn main() {
    let args: Vec<String> = env::args().collect();

    match run(&args) {
        Ok(()) => {}
        Err(e) => {
            eprintln!("error: {}", e);
            process::exit(1);
        }
    }
}

fn run(args: &[String]) -> Result<(), String> {
    let config = parse_args(args)?;

    let input = fs::read_to_string(&config.file)
        .map_err(|e| format!("failed to read '{}': {}", config.file, e))?;

    // The file may hold a raw `/** ... */` or `///` comment, or already
    // stripped content. Raw comments also decide the flavor.
    let (content, markup) = match strip(&input) {
        Some(s) => (s.content, s.markup),
        None => {
            let markup = if config.markdown {
                Markup::Markdown
            } else {
                Markup::Html
            };
            (input.clone(), markup)
        }
    };

    let parser = DocParser::new(markup);

    match config.command {
        Command::Parse => cmd_parse(&parser, &content, &config),
        Command::Validate => cmd_validate(&parser, &content, &config),
        Command::Stats => cmd_stats(&parser, &content),
    }
}

#[derive(Debug)]
struct Config {
    command: Command,
    file: String,
    format: OutputFormat,
    verbose: bool,
    markdown: bool,
}

#[derive(Debug, Clone, Copy)]
enum Command {
    Parse,
    Validate,
    Stats,
}

#[derive(Debug, Clone, Copy)]
enum OutputFormat {
    Text,
    Json,
}

fn parse_args(args: &[String]) -> Result<Config, String> {
    let mut command = Command::Parse;
    let mut format = OutputFormat::Text;
    let mut verbose = false;
    let mut markdown = false;
    let mut file = None;

    let mut i = 1;
    while i < args.len() {
        let arg = &args[i];
        match arg.as_str() {
            "-h" | "--help" => {
                print_help();
                process::exit(0);
            }
            "-V" | "--version" => {
                println!("dtcli {}", env!("CARGO_PKG_VERSION"));
                process::exit(0);
            }
            "-v" | "--verbose" => verbose = true,
            "-j" | "--json" => format = OutputFormat::Json,
            "-m" | "--markdown" => markdown = true,
            "parse" => command = Command::Parse,
            "validate" => command = Command::Validate,
            "stats" => command = Command::Stats,
            _ if arg.starts_with('-') => {
                return Err(format!("unknown option: {}", arg));
            }
            _ => {
                if file.is_some() {
                    return Err("multiple files specified".to_string());
                }
                file = Some(arg.clone());
            }
        }
        i += 1;
    }

    let file = file.ok_or_else(|| "no input file specified".to_string())?;

    Ok(Config {
        command,
        file,
        format,
        verbose,
        markdown,
    })
}

fn print_help() {
    eprintln!(
        r#"dtcli - documentation comment parser and validator

USAGE:
    dtcli [OPTIONS] [COMMAND] <FILE>

COMMANDS:
    parse       Parse and display the comment tree (default)
    validate    Check the comment for markup faults
    stats       Show comment statistics

OPTIONS:
    -v, --verbose    Show the full node tree
    -j, --json       Output in JSON format
    -m, --markdown   Treat bare content as Markdown-flavored
    -h, --help       Print help information
    -V, --version    Print version information

EXAMPLES:
    dtcli comment.txt           Parse a doc comment
    dtcli -v comment.txt        Parse with verbose output
    dtcli -j comment.txt        Output the tree as JSON
    dtcli validate comment.txt  Report markup faults
    dtcli stats comment.txt     Show comment statistics
"#
    );
}

// =============================================================================
// Parse Command
// =============================================================================

fn cmd_parse(parser: &DocParser, content: &str, config: &Config) -> Result<(), String> {
    let doc = parser.parse(content).map_err(|e| e.to_string())?;

    // Recovered faults are warnings; the tree is still complete.
    for err in doc.erroneous() {
        eprintln!(
            "warning: {} at {}..{}: {:?}",
            err.code, err.span.start, err.span.end, err.body
        );
    }

    match config.format {
        OutputFormat::Json => print_json(&doc),
        OutputFormat::Text => {
            if config.verbose {
                print_comment_verbose(&doc);
            } else {
                print_comment_summary(&doc);
            }
        }
    }

    Ok(())
}

// =============================================================================
// Validate Command
// =============================================================================

fn cmd_validate(parser: &DocParser, content: &str, config: &Config) -> Result<(), String> {
    let doc = match parser.parse(content) {
        Ok(doc) => doc,
        Err(e) => {
            if matches!(config.format, OutputFormat::Json) {
                println!(
                    "{}",
                    serde_json::json!({"valid": false, "fatal": e.to_string()})
                );
            }
            return Err(e.to_string());
        }
    };

    let faults: Vec<&Erroneous> = doc.erroneous().collect();

    if faults.is_empty() {
        if matches!(config.format, OutputFormat::Json) {
            println!(r#"{{"valid": true, "faults": []}}"#);
        } else {
            println!("Valid: no markup faults found");
        }
        Ok(())
    } else {
        if matches!(config.format, OutputFormat::Json) {
            let faults: Vec<_> = faults
                .iter()
                .map(|e| {
                    serde_json::json!({
                        "code": e.code.as_str(),
                        "body": e.body.as_ref(),
                        "span": {"start": e.span.start, "end": e.span.end},
                    })
                })
                .collect();
            println!("{}", serde_json::json!({"valid": false, "faults": faults}));
        } else {
            eprintln!("Invalid: {} fault(s) found", faults.len());
            for e in &faults {
                eprintln!("  - {} at {}..{}: {:?}", e.code, e.span.start, e.span.end, e.body);
            }
        }
        Err(format!("{} fault(s) found", faults.len()))
    }
}

// =============================================================================
// Stats Command
// =============================================================================

fn cmd_stats(parser: &DocParser, content: &str) -> Result<(), String> {
    let doc = parser.parse(content).map_err(|e| e.to_string())?;

    let stats = CommentStats::from_comment(&doc, content);

    println!("Comment Statistics");
    println!("------------------");
    println!("Markup:            {:?}", doc.markup);
    println!();
    println!("Tree:");
    println!("  First sentence:  {} node(s)", doc.first_sentence.len());
    println!("  Body:            {} node(s)", doc.body.len());
    println!("  Block tags:      {}", doc.block_tags.len());
    println!();
    println!("Nodes:");
    println!("  Text:            {}", stats.text);
    println!("  Start elements:  {}", stats.start_elements);
    println!("  End elements:    {}", stats.end_elements);
    println!("  Comments:        {}", stats.comments);
    println!("  Raw text:        {}", stats.raw_text);
    println!("  Faults:          {}", stats.erroneous);
    println!();
    println!("Size:");
    println!("  Characters:      {}", stats.chars);
    println!("  Words (est.):    {}", stats.words);
    println!("  Lines:           {}", stats.lines);

    Ok(())
}

struct CommentStats {
    text: usize,
    start_elements: usize,
    end_elements: usize,
    comments: usize,
    raw_text: usize,
    erroneous: usize,
    chars: usize,
    words: usize,
    lines: usize,
}

impl CommentStats {
    fn from_comment(doc: &DocComment, content: &str) -> Self {
        let mut stats = Self {
            text: 0,
            start_elements: 0,
            end_elements: 0,
            comments: 0,
            raw_text: 0,
            erroneous: 0,
            chars: content.len(),
            words: content.split_whitespace().count(),
            lines: content.lines().count(),
        };

        for node in doc.nodes() {
            match node {
                DocNode::Text(_) => stats.text += 1,
                DocNode::StartElement(_) => stats.start_elements += 1,
                DocNode::EndElement(_) => stats.end_elements += 1,
                DocNode::Comment(_) => stats.comments += 1,
                DocNode::RawText(_) => stats.raw_text += 1,
                DocNode::Erroneous(_) => stats.erroneous += 1,
            }
        }
        stats
    }
}

// =============================================================================
// JSON Output
// =============================================================================

#[derive(Serialize)]
struct JsonComment<'a> {
    markup: &'a str,
    first_sentence: Vec<JsonNode<'a>>,
    body: Vec<JsonNode<'a>>,
    block_tags: Vec<JsonBlockTag<'a>>,
}

#[derive(Serialize)]
#[serde(tag = "type")]
enum JsonNode<'a> {
    Text {
        pos: u32,
        content: &'a str,
    },
    StartElement {
        pos: u32,
        name: &'a str,
        attributes: Vec<JsonAttribute<'a>>,
        self_closing: bool,
    },
    EndElement {
        pos: u32,
        name: &'a str,
    },
    Comment {
        pos: u32,
        content: &'a str,
    },
    Erroneous {
        pos: u32,
        code: &'a str,
        body: &'a str,
    },
    RawText {
        pos: u32,
        content: &'a str,
    },
}

#[derive(Serialize)]
struct JsonAttribute<'a> {
    name: &'a str,
    value: Option<&'a str>,
}

#[derive(Serialize)]
struct JsonBlockTag<'a> {
    pos: u32,
    name: &'a str,
    kind: &'a str,
    content: Vec<JsonNode<'a>>,
}

fn print_json(doc: &DocComment) {
    let json_doc = convert_comment(doc);
    println!("{}", serde_json::to_string_pretty(&json_doc).unwrap());
}

fn convert_comment<'a>(doc: &'a DocComment) -> JsonComment<'a> {
    JsonComment {
        markup: match doc.markup {
            Markup::Html => "html",
            Markup::Markdown => "markdown",
        },
        first_sentence: doc.first_sentence.iter().map(convert_node).collect(),
        body: doc.body.iter().map(convert_node).collect(),
        block_tags: doc.block_tags.iter().map(convert_block_tag).collect(),
    }
}

fn convert_node<'a>(node: &'a DocNode) -> JsonNode<'a> {
    match node {
        DocNode::Text(t) => JsonNode::Text {
            pos: t.span.start,
            content: &t.content,
        },
        DocNode::StartElement(e) => JsonNode::StartElement {
            pos: e.span.start,
            name: &e.name,
            attributes: e.attributes.iter().map(convert_attribute).collect(),
            self_closing: e.self_closing,
        },
        DocNode::EndElement(e) => JsonNode::EndElement {
            pos: e.span.start,
            name: &e.name,
        },
        DocNode::Comment(c) => JsonNode::Comment {
            pos: c.span.start,
            content: &c.content,
        },
        DocNode::Erroneous(e) => JsonNode::Erroneous {
            pos: e.span.start,
            code: e.code.as_str(),
            body: &e.body,
        },
        DocNode::RawText(r) => JsonNode::RawText {
            pos: r.span.start,
            content: &r.content,
        },
    }
}

fn convert_attribute<'a>(attr: &'a Attribute) -> JsonAttribute<'a> {
    JsonAttribute {
        name: &attr.name,
        value: attr.value.as_deref(),
    }
}

fn convert_block_tag<'a>(tag: &'a BlockTag) -> JsonBlockTag<'a> {
    JsonBlockTag {
        pos: tag.span.start,
        name: &tag.name,
        kind: tag_kind_name(tag.kind),
        content: tag.content.iter().map(convert_node).collect(),
    }
}

fn tag_kind_name(kind: TagKind) -> &'static str {
    match kind {
        TagKind::Author => "author",
        TagKind::Deprecated => "deprecated",
        TagKind::Param => "param",
        TagKind::Return => "return",
        TagKind::See => "see",
        TagKind::Since => "since",
        TagKind::Throws => "throws",
        TagKind::Version => "version",
        TagKind::Unknown => "unknown",
    }
}

// =============================================================================
// Text Output
// =============================================================================

fn print_comment_summary(doc: &DocComment) {
    println!("Markup: {:?}", doc.markup);
    println!("First sentence: {} node(s)", doc.first_sentence.len());
    for node in &doc.first_sentence {
        println!("  {}", describe_node(node));
    }
    println!("Body: {} node(s)", doc.body.len());
    for node in &doc.body {
        println!("  {}", describe_node(node));
    }
    println!("Block tags: {}", doc.block_tags.len());
    for tag in &doc.block_tags {
        println!("  @{} ({} node(s))", tag.name, tag.content.len());
    }
}

fn print_comment_verbose(doc: &DocComment) {
    println!("=== Doc Comment Tree ===");
    println!();
    println!("Markup: {:?}", doc.markup);
    println!("Span: {}..{}", doc.span.start, doc.span.end);
    println!();

    println!("--- First Sentence ---");
    for node in &doc.first_sentence {
        println!("  {}", describe_node(node));
    }
    println!();
    println!("--- Body ---");
    for node in &doc.body {
        println!("  {}", describe_node(node));
    }
    println!();
    println!("--- Block Tags ---");
    for tag in &doc.block_tags {
        println!(
            "  @{} [{}] pos:{}",
            tag.name,
            tag_kind_name(tag.kind),
            tag.span.start
        );
        for node in &tag.content {
            println!("    {}", describe_node(node));
        }
    }
}

fn describe_node(node: &DocNode) -> String {
    match node {
        DocNode::Text(t) => format!("Text pos:{} {:?}", t.span.start, preview(&t.content)),
        DocNode::StartElement(e) => format!(
            "StartElement pos:{} <{}{}> ({} attribute(s))",
            e.span.start,
            e.name,
            if e.self_closing { "/" } else { "" },
            e.attributes.len()
        ),
        DocNode::EndElement(e) => format!("EndElement pos:{} </{}>", e.span.start, e.name),
        DocNode::Comment(c) => format!("Comment pos:{} {:?}", c.span.start, preview(&c.content)),
        DocNode::Erroneous(e) => format!(
            "Erroneous pos:{} code:{} body:{:?}",
            e.span.start, e.code, e.body
        ),
        DocNode::RawText(r) => format!("RawText pos:{} {:?}", r.span.start, preview(&r.content)),
    }
}

fn preview(content: &str) -> String {
    let short: String = content.chars().take(60).collect();
    let ellipsis = if content.len() > 60 { "..." } else { "" };
    format!("{}{}", short.replace('\n', "\\n"), ellipsis)
}
