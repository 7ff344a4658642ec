//! End-to-end scenarios and boundary behaviors, driven entirely through the
//! public library API against on-disk fixture packages.

mod common;

use docx_review::diff::diff;
use docx_review::docx::{parse_document, serialize_document, EditDriver};
use docx_review::extract::extract;
use docx_review::manifest::Manifest;
use docx_review::model::Inline;
use docx_review::opc::PartStore;
use pretty_assertions::assert_eq;

fn apply_manifest(
    input: &std::path::Path,
    output: &std::path::Path,
    manifest_json: &str,
) -> (docx_review::docx::EditOutcome, PartStore) {
    let manifest = Manifest::parse(manifest_json.as_bytes()).expect("manifest parses");
    let mut store = PartStore::open_for_edit(input, output).expect("open for edit");
    let mut doc = parse_document(store.main_document()).expect("parse document");

    let driver = EditDriver::new("Reviewer".to_string(), "2026-07-31T00:00:00Z".to_string(), false);
    let mut scratch = Vec::new();
    let comments_xml = if manifest.comments.is_empty() { &mut scratch } else { store.ensure_comments_mut() };
    let outcome = driver.apply(&mut doc, comments_xml, &manifest);

    let bytes = serialize_document(&doc);
    store.set_main_document(bytes);
    store.commit(output).expect("commit");
    (outcome, store)
}

/// Scenario A: single-run replace.
#[test]
fn scenario_a_single_run_replace() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.docx");
    let output = dir.path().join("out.docx");
    common::write_docx(&input, &common::paragraph(&common::run("The methodology was applied to all subjects")));

    let manifest = r#"{"changes":[{"type":"replace","find":"methodology","replace":"methods"}]}"#;
    let (outcome, store) = apply_manifest(&input, &output, manifest);

    assert!(outcome.all_succeeded());
    assert_eq!(outcome.changes_succeeded(), 1);

    let doc = parse_document(store.main_document()).unwrap();
    let docx_review::docx::tree::BlockNode::Paragraph(p) = &doc.blocks[0] else { panic!("expected paragraph") };
    let children = &p.model.children;
    assert_eq!(children.len(), 4);
    let Inline::Run(r0) = &children[0] else { panic!() };
    assert_eq!(r0.text, "The ");
    let Inline::DeletedRun(del) = &children[1] else { panic!() };
    assert_eq!(del.text(), "methodology");
    let Inline::InsertedRun(ins) = &children[2] else { panic!() };
    assert_eq!(ins.text(), "methods");
    let Inline::Run(r3) = &children[3] else { panic!() };
    assert_eq!(r3.text, " was applied to all subjects");

    let read_store = PartStore::open_read(&output).unwrap();
    let extracted = extract(&doc, &read_store);
    let tc = &extracted.paragraphs[0].tracked_changes;
    assert!(tc.iter().any(|c| c.kind.as_str() == "insert" && c.text == "methods"));
    assert!(tc.iter().any(|c| c.kind.as_str() == "delete" && c.text == "methodology"));
}

/// Scenario B: multi-run match, formatting carried from the boundary runs.
#[test]
fn scenario_b_multi_run_match_preserves_formatting() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.docx");
    let output = dir.path().join("out.docx");
    let runs = format!("{}{}", common::run("The metho"), common::bold_run("dology was"));
    common::write_docx(&input, &common::paragraph(&runs));

    let manifest = r#"{"changes":[{"type":"replace","find":"methodology","replace":"methods"}]}"#;
    let (outcome, store) = apply_manifest(&input, &output, manifest);
    assert!(outcome.all_succeeded());

    let doc = parse_document(store.main_document()).unwrap();
    let docx_review::docx::tree::BlockNode::Paragraph(p) = &doc.blocks[0] else { panic!() };
    let del = p.model.children.iter().find_map(|c| match c {
        Inline::DeletedRun(t) => Some(t),
        _ => None,
    }).expect("a deletion");
    assert_eq!(del.runs.len(), 2);
    assert_eq!(del.runs[0].text, "metho");
    assert!(!del.runs[0].properties.bold.is_on());
    assert_eq!(del.runs[1].text, "dology");
    assert!(del.runs[1].properties.bold.is_on());

    let ins = p.model.children.iter().find_map(|c| match c {
        Inline::InsertedRun(t) => Some(t),
        _ => None,
    }).expect("an insertion");
    assert_eq!(ins.runs.len(), 1);
    assert_eq!(ins.runs[0].text, "methods");
    assert!(!ins.runs[0].properties.bold.is_on());
}

/// Scenario C: anchor not found — per-operation failure, file still written.
#[test]
fn scenario_c_anchor_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.docx");
    let output = dir.path().join("out.docx");
    common::write_docx(&input, &common::paragraph(&common::run("Hello world")));
    let original = PartStore::open_read(&input).unwrap().main_document().to_vec();

    let manifest = r#"{"changes":[{"type":"delete","find":"nonexistent"}]}"#;
    let (outcome, store) = apply_manifest(&input, &output, manifest);

    assert!(!outcome.all_succeeded());
    assert_eq!(outcome.changes_succeeded(), 0);
    assert_eq!(outcome.change_results.len(), 1);
    assert!(!outcome.change_results[0].success);
    assert!(outcome.change_results[0].message.contains("nonexistent"));

    assert!(std::path::Path::new(&output).exists());
    assert_eq!(store.main_document(), original.as_slice());
}

/// Scenario D: a comment and a replace sharing the same anchor text.
#[test]
fn scenario_d_comment_then_replace_shared_anchor() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.docx");
    let output = dir.path().join("out.docx");
    common::write_docx(&input, &common::paragraph(&common::run("The methodology was applied")));

    let manifest = r#"{
        "comments": [ { "anchor": "methodology", "text": "please clarify" } ],
        "changes": [ { "type": "replace", "find": "methodology", "replace": "methods" } ]
    }"#;
    let (outcome, store) = apply_manifest(&input, &output, manifest);

    assert!(outcome.all_succeeded());
    assert_eq!(outcome.comments_created.len(), 1);

    let doc = parse_document(store.main_document()).unwrap();
    let extracted = extract(&doc, &store);
    assert_eq!(extracted.comments.len(), 1);
    assert_eq!(extracted.comments[0].anchor_text, "methodology");
    assert_eq!(extracted.comments[0].text, "please clarify");

    let docx_review::docx::tree::BlockNode::Paragraph(p) = &doc.blocks[0] else { panic!() };
    let kinds: Vec<&str> = p.model.children.iter().map(|c| match c {
        Inline::CommentRangeStart { .. } => "start",
        Inline::CommentRangeEnd { .. } => "end",
        Inline::CommentReference { .. } => "ref",
        Inline::DeletedRun(_) => "del",
        Inline::InsertedRun(_) => "ins",
        Inline::Run(_) => "run",
        _ => "other",
    }).collect();
    let start_pos = kinds.iter().position(|k| *k == "start").unwrap();
    let end_pos = kinds.iter().position(|k| *k == "end").unwrap();
    let del_pos = kinds.iter().position(|k| *k == "del").unwrap();
    assert!(start_pos < del_pos && del_pos < end_pos);
}

/// Scenario E: a document diffed against itself is identical.
#[test]
fn scenario_e_identical_diff() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("a.docx");
    common::write_docx(&path, &common::paragraph(&common::run("The quick fox jumps")));

    let store_a = PartStore::open_read(&path).unwrap();
    let doc_a = parse_document(store_a.main_document()).unwrap();
    let extracted_a = extract(&doc_a, &store_a);

    let store_b = PartStore::open_read(&path).unwrap();
    let doc_b = parse_document(store_b.main_document()).unwrap();
    let extracted_b = extract(&doc_b, &store_b);

    let d = diff(&extracted_a, &extracted_b);
    assert!(d.summary.identical);
    assert!(d.paragraphs.added.is_empty());
    assert!(d.paragraphs.deleted.is_empty());
    assert!(d.paragraphs.modified.is_empty());
    assert!(d.comments.added.is_empty());
    assert!(d.tracked_changes.added.is_empty());
}

/// Scenario F: word-level diff collapses an adjacent delete/add into one replace.
#[test]
fn scenario_f_word_diff_collapse() {
    let dir = tempfile::tempdir().unwrap();
    let path_a = dir.path().join("a.docx");
    let path_b = dir.path().join("b.docx");
    common::write_docx(&path_a, &common::paragraph(&common::run("foo bar baz qux")));
    common::write_docx(&path_b, &common::paragraph(&common::run("foo zar baz qux")));

    let store_a = PartStore::open_read(&path_a).unwrap();
    let doc_a = parse_document(store_a.main_document()).unwrap();
    let extracted_a = extract(&doc_a, &store_a);

    let store_b = PartStore::open_read(&path_b).unwrap();
    let doc_b = parse_document(store_b.main_document()).unwrap();
    let extracted_b = extract(&doc_b, &store_b);

    let d = diff(&extracted_a, &extracted_b);
    assert_eq!(d.paragraphs.modified.len(), 1);
    let changes = &d.paragraphs.modified[0].word_changes;
    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].kind.as_str(), "replace");
    assert_eq!(changes[0].old.as_deref(), Some("bar"));
    assert_eq!(changes[0].new.as_deref(), Some("zar"));
    assert_eq!(changes[0].position, 1);
}

/// Boundary: a manifest with zero entries leaves the main document
/// byte-identical and reports success.
#[test]
fn empty_manifest_is_a_byte_identical_noop() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.docx");
    let output = dir.path().join("out.docx");
    common::write_docx(&input, &common::paragraph(&common::run("Unchanged text")));

    let before = PartStore::open_read(&input).unwrap().main_document().to_vec();
    let (outcome, store) = apply_manifest(&input, &output, "{}");
    assert!(outcome.all_succeeded());
    assert_eq!(store.main_document(), before.as_slice());
}

/// Boundary: text that was just tracked-deleted is not visible to a later find.
#[test]
fn deleted_text_is_not_visible_to_later_matches() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.docx");
    let output = dir.path().join("out.docx");
    common::write_docx(&input, &common::paragraph(&common::run("alpha beta gamma")));

    let manifest = r#"{"changes":[
        {"type":"delete","find":"beta"},
        {"type":"delete","find":"beta"}
    ]}"#;
    let (outcome, _store) = apply_manifest(&input, &output, manifest);
    assert!(outcome.change_results[0].success);
    assert!(!outcome.change_results[1].success);
}

/// Boundary: text that was just tracked-inserted IS visible to a later find.
#[test]
fn inserted_text_is_visible_to_later_matches() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.docx");
    let output = dir.path().join("out.docx");
    common::write_docx(&input, &common::paragraph(&common::run("alpha gamma")));

    let manifest = r#"{"changes":[
        {"type":"insert_after","anchor":"alpha","text":" beta"},
        {"type":"replace","find":"beta","replace":"BETA"}
    ]}"#;
    let (outcome, _store) = apply_manifest(&input, &output, manifest);
    assert!(outcome.all_succeeded());
}
