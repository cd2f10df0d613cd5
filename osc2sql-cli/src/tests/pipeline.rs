//! End-to-end tests driving the conversion pipeline against files on disk.

use super::helpers::{SAMPLE_CHANGESET, Workspace, sample_sql};
use super::*;
use camino::Utf8Path;
use osc2sql_core::{EmitOptions, IdPolicy, POSTAMBLE, PREAMBLE, QuoteStyle};
use osc2sql_data::ChangesetParseError;
use rstest::{fixture, rstest};

#[fixture]
fn workspace() -> Workspace {
    Workspace::new()
}

fn config_for(workspace: &Workspace, input: &Utf8Path, options: EmitOptions) -> ConvertConfig {
    ConvertConfig {
        input: input.to_path_buf(),
        output: Some(workspace.output_path()),
        radius: DEFAULT_RADIUS,
        factor: DEFAULT_FACTOR,
        verbose: false,
        options,
    }
}

#[rstest]
#[case("changes.osc.bz2", true)]
#[case("changes.OSC.BZ2", true)]
#[case("changes.osc", false)]
#[case("bz2", false)]
#[case("changes.bz2.osc", false)]
fn bz2_detection_uses_the_final_extension(#[case] name: &str, #[case] compressed: bool) {
    assert_eq!(convert::is_bz2(Utf8Path::new(name)), compressed);
}

#[rstest]
fn converts_plain_changeset_into_file(workspace: Workspace) {
    let input = workspace.write_changeset("changes.osc", SAMPLE_CHANGESET);
    let config = config_for(&workspace, &input, EmitOptions::default());

    let report = convert::execute(&config).expect("conversion succeeds");

    assert_eq!(workspace.read_output(), sample_sql());
    assert_eq!(report.summary.operations, 2);
    assert_eq!(report.summary.nodes, 1);
    assert_eq!(report.summary.ways, 1);
    assert!(report.diagnostics.is_empty());
}

#[rstest]
fn compressed_input_matches_plain_output(workspace: Workspace) {
    let input = workspace.write_bz2_changeset("changes.osc.bz2", SAMPLE_CHANGESET);
    let config = config_for(&workspace, &input, EmitOptions::default());

    convert::execute(&config).expect("conversion succeeds");

    assert_eq!(workspace.read_output(), sample_sql());
}

#[rstest]
fn single_quote_style_changes_every_literal(workspace: Workspace) {
    let input = workspace.write_changeset("changes.osc", SAMPLE_CHANGESET);
    let options = EmitOptions {
        quote_style: QuoteStyle::Single,
        id_policy: IdPolicy::Strict,
    };
    let config = config_for(&workspace, &input, options);

    convert::execute(&config).expect("conversion succeeds");

    assert_eq!(workspace.read_output(), sample_sql().replace('"', "'"));
}

#[rstest]
fn lenient_policy_keeps_malformed_ids(workspace: Workspace) {
    let input = workspace.write_changeset(
        "changes.osc",
        r#"<osmChange><delete><node id="12abc"/></delete></osmChange>"#,
    );
    let strict = config_for(&workspace, &input, EmitOptions::default());
    let report = convert::execute(&strict).expect("strict conversion succeeds");
    assert_eq!(report.summary.skipped, 1);
    assert_eq!(workspace.read_output(), format!("{PREAMBLE}{POSTAMBLE}"));

    let lenient = config_for(
        &workspace,
        &input,
        EmitOptions {
            id_policy: IdPolicy::Lenient,
            ..EmitOptions::default()
        },
    );
    let report = convert::execute(&lenient).expect("lenient conversion succeeds");
    assert_eq!(report.summary.skipped, 0);
    assert!(workspace.read_output().contains(r#"DELETE FROM nodes WHERE id="12";"#));
}

#[rstest]
fn malformed_changeset_reports_parse_error(workspace: Workspace) {
    let input = workspace.write_changeset("broken.osc", "<osmChange><create><node id=\"1\">");
    let config = config_for(&workspace, &input, EmitOptions::default());

    match convert::execute(&config).expect_err("parse should fail") {
        CliError::ParseInput { path, source } => {
            assert_eq!(path, input);
            assert!(matches!(*source, ChangesetParseError::Unclosed { .. }));
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[rstest]
fn missing_output_directory_reports_open_error(workspace: Workspace) {
    let input = workspace.write_changeset("changes.osc", SAMPLE_CHANGESET);
    let mut config = config_for(&workspace, &input, EmitOptions::default());
    let target = workspace.root().join("absent/out.sql");
    config.output = Some(target.clone());

    match convert::execute(&config).expect_err("output should fail") {
        CliError::OpenOutput { path, .. } => assert_eq!(path, target),
        other => panic!("unexpected error {other:?}"),
    }
}
