//! `storyweave-ctl render`: turn a widget JSON file into a component and an
//! embed snippet without contacting the server.

use std::path::{Path, PathBuf};

use storyweave_sdk::{emit_component, emit_embed_with_cdn, ComponentSource, EmbedSource, DEFAULT_CDN_BASE};
use storyweave_shared::models::{WidgetDescription, WidgetResponse};

use crate::cli_config::loader::expand_path;
use crate::cli_config::CliConfig;
use crate::error::{CtlError, CtlResult};
use crate::output;
use crate::RenderArgs;

/// Widget id used when neither `--widget-id` nor the input file supplies one.
pub(crate) const DEFAULT_WIDGET_ID: &str = "preview";

pub(crate) const EMBED_FILE_NAME: &str = "embed.html";

/// A widget read from disk, with the id of the server response it came from.
#[derive(Debug)]
pub(crate) struct LoadedWidget {
    pub widget: WidgetDescription,
    pub widget_id: Option<String>,
}

/// Read either a bare widget description or a saved `WidgetResponse`
/// (recognised by its `widget_data` field).
pub(crate) fn load_widget(path: &Path) -> CtlResult<LoadedWidget> {
    let contents = std::fs::read_to_string(path).map_err(|source| CtlError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let invalid = |source: serde_json::Error| CtlError::InvalidWidget {
        path: path.to_path_buf(),
        source,
    };

    let value: serde_json::Value = serde_json::from_str(&contents).map_err(invalid)?;
    if value.get("widget_data").is_some() {
        let response: WidgetResponse = serde_json::from_value(value).map_err(invalid)?;
        Ok(LoadedWidget {
            widget: response.widget_data,
            widget_id: Some(response.widget_id),
        })
    } else {
        Ok(LoadedWidget {
            widget: serde_json::from_value(value).map_err(invalid)?,
            widget_id: None,
        })
    }
}

pub(crate) fn handle_render_command(args: RenderArgs, config: &CliConfig) -> CtlResult<()> {
    let LoadedWidget {
        mut widget,
        widget_id: saved_id,
    } = load_widget(&args.input)?;

    for issue in widget.validate() {
        output::warning(issue);
    }
    let renamed = widget.dedupe_element_ids();
    if renamed > 0 {
        output::dim(format!("Renamed {renamed} duplicate element id(s)"));
    }

    let widget_id = args
        .widget_id
        .or(saved_id)
        .unwrap_or_else(|| DEFAULT_WIDGET_ID.to_string());
    let cdn_base = args
        .cdn_base
        .or_else(|| config.cdn_base_url.clone())
        .unwrap_or_else(|| DEFAULT_CDN_BASE.to_string());

    let component = emit_component(&widget)?;
    let embed = emit_embed_with_cdn(&widget, &widget_id, &cdn_base)?;
    tracing::debug!(component = %component.name, %widget_id, "Rendered widget");

    let output_dir = args.output_dir.or_else(|| {
        config
            .default_output_dir
            .as_deref()
            .map(expand_path)
    });

    match output_dir {
        Some(dir) => {
            let written = write_artifacts(&dir, &component, &embed)?;
            output::success(format!("Rendered {}", component.name));
            for path in written {
                output::label("Wrote", path.display());
            }
            output::label("Embed URL", &embed.script_url);
        }
        None => {
            output::header(component.file_name());
            output::plain(component.code.trim_end());
            output::blank();
            output::header(EMBED_FILE_NAME);
            output::plain(embed.code.trim_end());
        }
    }
    Ok(())
}

/// Write `<Component>.jsx` and `embed.html` into `dir`, creating it first.
fn write_artifacts(
    dir: &Path,
    component: &ComponentSource,
    embed: &EmbedSource,
) -> CtlResult<Vec<PathBuf>> {
    std::fs::create_dir_all(dir).map_err(|source| CtlError::Write {
        path: dir.to_path_buf(),
        source,
    })?;

    let files = [
        (dir.join(component.file_name()), &component.code),
        (dir.join(EMBED_FILE_NAME), &embed.code),
    ];
    let mut written = Vec::with_capacity(files.len());
    for (path, contents) in files {
        std::fs::write(&path, contents).map_err(|source| CtlError::Write {
            path: path.clone(),
            source,
        })?;
        written.push(path);
    }
    Ok(written)
}
