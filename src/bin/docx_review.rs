//! `docx-review` CLI entry point: parses arguments, dispatches to the
//! requested mode, and maps the outcome to an exit code.

use anyhow::{bail, Context, Result};
use clap::Parser;
use docx_review::cli::{Cli, Mode};
use docx_review::diff::diff;
use docx_review::docx::{parse_document, serialize_document, EditDriver};
use docx_review::extract::extract;
use docx_review::manifest::Manifest;
use docx_review::opc::PartStore;
use docx_review::output::{build_diff_output, build_processing_result, build_read_output};
use std::io::{IsTerminal, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::info;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| run(&cli)));
    match result {
        Ok(Ok(code)) => ExitCode::from(code),
        Ok(Err(err)) => {
            eprintln!("docx-review: {err:#}");
            ExitCode::from(1)
        }
        Err(_) => {
            eprintln!("docx-review: internal error (panic)");
            ExitCode::from(1)
        }
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

fn run(cli: &Cli) -> Result<u8> {
    match cli.mode() {
        Mode::Read => run_read(cli),
        Mode::Diff => run_diff(cli),
        Mode::TextConv => run_textconv(cli),
        Mode::Create => run_create(cli),
        Mode::GitSetup => run_git_setup(cli),
        Mode::Edit => run_edit(cli),
    }
}

fn run_read(cli: &Cli) -> Result<u8> {
    let file = cli.args.first().context("read mode requires a document path")?;
    let store = PartStore::open_read(file)?;
    let doc = parse_document(store.main_document())?;
    let extracted = extract(&doc, &store);
    let output = build_read_output(&file.display().to_string(), &extracted);

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print_read_human(&output);
    }
    Ok(0)
}

fn print_read_human(out: &docx_review::output::ReadOutput) {
    println!("{}", out.file);
    println!(
        "  {} paragraph(s), {} word(s), {} comment(s), {} tracked change(s)",
        out.metadata.paragraph_count,
        out.metadata.word_count,
        out.summary.total_comments,
        out.summary.total_tracked_changes
    );
    for p in &out.paragraphs {
        println!("  ¶{}: {}", p.index, p.text);
    }
    for c in &out.comments {
        println!("  comment #{} [{}]: {}", c.id, c.author, c.text);
    }
}

fn run_diff(cli: &Cli) -> Result<u8> {
    if cli.args.len() < 2 {
        bail!("diff mode requires two document paths");
    }
    let (old_path, new_path) = (&cli.args[0], &cli.args[1]);
    let old_extracted = extract_document(old_path)?;
    let new_extracted = extract_document(new_path)?;
    let d = diff(&old_extracted, &new_extracted);
    let output = build_diff_output(&old_path.display().to_string(), &new_path.display().to_string(), &d);

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print_diff_human(&output);
    }
    Ok(if output.summary.identical { 0 } else { 1 })
}

fn print_diff_human(out: &docx_review::output::DiffOutput) {
    if out.summary.identical {
        println!("{} and {} are identical", out.old_file, out.new_file);
        return;
    }
    println!("--- {}", out.old_file);
    println!("+++ {}", out.new_file);
    for p in &out.paragraphs.deleted {
        println!("- ¶{}: {}", p.index, p.text);
    }
    for p in &out.paragraphs.added {
        println!("+ ¶{}: {}", p.index, p.text);
    }
    for m in &out.paragraphs.modified {
        println!("~ ¶{} -> ¶{}", m.old_index, m.new_index);
        for w in &m.word_changes {
            match w.kind {
                "delete" => println!("    - {}", w.old.as_deref().unwrap_or_default()),
                "add" => println!("    + {}", w.new.as_deref().unwrap_or_default()),
                _ => println!(
                    "    ~ {} -> {}",
                    w.old.as_deref().unwrap_or_default(),
                    w.new.as_deref().unwrap_or_default()
                ),
            }
        }
    }
    for c in &out.comments.added {
        println!("+ comment [{}]: {}", c.author, c.text);
    }
    for c in &out.comments.deleted {
        println!("- comment [{}]: {}", c.author, c.text);
    }
    println!(
        "summary: {} paragraph(s) added, {} deleted, {} modified",
        out.summary.paragraphs_added, out.summary.paragraphs_deleted, out.summary.paragraphs_modified
    );
}

fn run_textconv(cli: &Cli) -> Result<u8> {
    let file = cli.args.first().context("textconv mode requires a document path")?;
    let store = PartStore::open_read(file)?;
    let doc = parse_document(store.main_document())?;
    let extracted = extract(&doc, &store);
    print!("{}", docx_review::textconv::convert(&doc, &extracted));
    Ok(0)
}

fn extract_document(path: &Path) -> Result<docx_review::extract::ExtractedDocument> {
    let store = PartStore::open_read(path)?;
    let doc = parse_document(store.main_document())?;
    Ok(extract(&doc, &store))
}

fn run_edit(cli: &Cli) -> Result<u8> {
    let input = cli.args.first().context("edit mode requires an input document path")?;
    let output_path = cli.output.clone().unwrap_or_else(|| input.clone());

    let manifest_bytes = match cli.args.get(1) {
        Some(path) => std::fs::read(path).with_context(|| format!("reading manifest {}", path.display()))?,
        None => {
            let mut stdin = std::io::stdin();
            if stdin.is_terminal() {
                bail!("edit mode requires a manifest path or redirected stdin");
            }
            let mut buf = Vec::new();
            stdin.read_to_end(&mut buf)?;
            buf
        }
    };
    let manifest = Manifest::parse(&manifest_bytes)?;

    let author = cli
        .author
        .clone()
        .or_else(|| manifest.author.clone())
        .unwrap_or_else(|| "Reviewer".to_string());
    let date = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string();

    let mut store = PartStore::open_for_edit(input, &output_path)?;
    let mut doc = parse_document(store.main_document())?;

    let driver = EditDriver::new(author.clone(), date, cli.dry_run);
    let mut scratch = Vec::new();
    let comments_xml: &mut Vec<u8> =
        if manifest.comments.is_empty() { &mut scratch } else { store.ensure_comments_mut() };
    let outcome = driver.apply(&mut doc, comments_xml, &manifest);

    if !cli.dry_run {
        let bytes = serialize_document(&doc);
        store.set_main_document(bytes);
        store.commit(&output_path)?;
    }

    let result = build_processing_result(
        &input.display().to_string(),
        &output_path.display().to_string(),
        &author,
        &outcome,
    );

    info!(
        target: "edit.apply",
        changes = result.changes_succeeded,
        comments = result.comments_succeeded,
        success = result.success,
        "edit applied"
    );

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_processing_human(&result);
    }
    Ok(if result.success { 0 } else { 1 })
}

fn print_processing_human(r: &docx_review::output::ProcessingResult) {
    println!("{} -> {} (author: {})", r.input, r.output, r.author);
    for entry in &r.results {
        let mark = if entry.success { "ok" } else { "FAILED" };
        println!("  [{mark}] {} #{}: {}", entry.kind, entry.index, entry.message);
    }
    println!(
        "{}/{} comment(s), {}/{} change(s) succeeded",
        r.comments_succeeded, r.comments_attempted, r.changes_succeeded, r.changes_attempted
    );
}

fn run_create(cli: &Cli) -> Result<u8> {
    let output_path = cli.output.clone().unwrap_or_else(|| PathBuf::from("new.docx"));
    write_blank_docx(&output_path)?;
    println!("created {}", output_path.display());
    Ok(0)
}

fn write_blank_docx(path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)?;
    let mut writer = zip::ZipWriter::new(file);
    let opts = zip::write::SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    writer.start_file("[Content_Types].xml", opts)?;
    writer.write_all(br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/></Types>"#)?;

    writer.start_file("_rels/.rels", opts)?;
    writer.write_all(br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#)?;

    writer.start_file("word/document.xml", opts)?;
    writer.write_all(br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body><w:p/><w:sectPr/></w:body></w:document>"#)?;

    writer.finish()?;
    Ok(())
}

fn run_git_setup(_cli: &Cli) -> Result<u8> {
    println!("# Add to .gitattributes:");
    println!("*.docx diff=docx-review");
    println!();
    println!("# Then run:");
    println!("git config diff.docx-review.textconv \"docx-review --textconv\"");
    Ok(0)
}
