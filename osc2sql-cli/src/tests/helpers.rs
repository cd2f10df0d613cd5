//! Test helpers for staging changesets on disk and composing layered config.

use super::*;
use camino::{Utf8Path, Utf8PathBuf};
use ortho_config::MergeComposer;
use osc2sql_core::{POSTAMBLE, PREAMBLE};
use serde_json::{Map, Value};
use std::{fs, io::Write};
use tempfile::TempDir;

pub(super) const SAMPLE_CHANGESET: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<osmChange version="0.6" generator="osc2sql tests">
  <create>
    <node id="5" lat="1.5" lon="2.5" user="ann">
      <tag k="name" v="Quay"/>
    </node>
  </create>
  <delete>
    <way id="9"/>
  </delete>
</osmChange>
"#;

/// The SQL expected for [`SAMPLE_CHANGESET`] with `"` delimiters.
pub(super) fn sample_sql() -> String {
    [
        PREAMBLE,
        r#"INSERT INTO nodes (id, lat, lon, visible, user, timestamp) VALUES ("5", "1.5", "2.5", NULL, "ann", NULL);
INSERT INTO node_tags (id, k, v) VALUES ("5", "name", "Quay");
DELETE FROM ways WHERE id="9";
DELETE FROM way_nodes WHERE wayid="9";
DELETE FROM way_tags WHERE id="9";
"#,
        POSTAMBLE,
    ]
    .concat()
}

/// Layer values standing in for a configuration file or the environment.
#[derive(Debug, Clone, Default)]
pub(super) struct LayerOverrides {
    pub(super) input: Option<Utf8PathBuf>,
    pub(super) quote_style: Option<&'static str>,
    pub(super) id_policy: Option<&'static str>,
}

impl LayerOverrides {
    fn to_json(&self) -> Value {
        let mut map = Map::new();
        if let Some(input) = &self.input {
            map.insert("input".into(), Value::from(input.as_str()));
        }
        if let Some(style) = self.quote_style {
            map.insert("quote_style".into(), Value::from(style));
        }
        if let Some(policy) = self.id_policy {
            map.insert("id_policy".into(), Value::from(policy));
        }
        Value::Object(map)
    }
}

/// A scratch directory holding changesets and SQL output.
#[derive(Debug)]
pub(super) struct Workspace {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl Workspace {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 tempdir");
        Self { _dir: dir, root }
    }

    pub(super) fn root(&self) -> &Utf8Path {
        &self.root
    }

    pub(super) fn write_changeset(&self, name: &str, contents: &str) -> Utf8PathBuf {
        let path = self.root.join(name);
        fs::write(&path, contents).expect("write changeset");
        path
    }

    pub(super) fn write_bz2_changeset(&self, name: &str, contents: &str) -> Utf8PathBuf {
        let mut encoder =
            bzip2::write::BzEncoder::new(Vec::new(), bzip2::Compression::default());
        encoder
            .write_all(contents.as_bytes())
            .expect("compress changeset");
        let compressed = encoder.finish().expect("finish bz2 stream");
        let path = self.root.join(name);
        fs::write(&path, compressed).expect("write compressed changeset");
        path
    }

    pub(super) fn output_path(&self) -> Utf8PathBuf {
        self.root.join("out.sql")
    }

    pub(super) fn read_output(&self) -> String {
        fs::read_to_string(self.output_path()).expect("read SQL output")
    }
}

/// Strip unset flags so they do not mask lower-precedence layers.
fn cli_layer(args: &ConvertArgs) -> Value {
    let mut value = serde_json::to_value(args).expect("serialise CLI args");
    if let Value::Object(map) = &mut value {
        map.retain(|_, entry| !entry.is_null());
    }
    value
}

/// Merge `args` over optional file and environment layers, then validate.
pub(super) fn merge_layers(
    args: &ConvertArgs,
    file_layer: Option<&LayerOverrides>,
    env_layer: Option<&LayerOverrides>,
) -> Result<ConvertConfig, CliError> {
    let mut composer = MergeComposer::new();
    if let Some(layer) = file_layer {
        composer.push_file(layer.to_json(), None);
    }
    if let Some(layer) = env_layer {
        composer.push_environment(layer.to_json());
    }
    composer.push_cli(cli_layer(args));
    let config = config::config_from_layers_for_test(composer.layers())?;
    config.validate_sources()?;
    Ok(config)
}
