// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Nereid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! nereid-mindmap CLI entrypoint.
//!
//! Opens a JSON mind map (or the built-in demo) in the interactive TUI. `--print` renders a
//! single frame to stdout instead, which needs no terminal.

use std::error::Error;
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use nereid_mindmap::editor::{EditorConfig, MindMapEditor};
use nereid_mindmap::model::MindMapNode;
use nereid_mindmap::store::MindMapFile;
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILE: &str = "nereid-mindmap.log";
const DEFAULT_PRINT_SIZE: (u16, u16) = (100, 30);

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} [<file.json>] [--log-file <path>]\n  {program} --demo [--log-file <path>]\n  {program} [<file.json> | --demo] --print [--size <cols>x<rows>]\n\nWithout a file the built-in demo map is shown and saving is disabled.\nA file that does not exist yet starts a new map and is created on the first save (`s`).\n--print renders one frame to stdout and exits (default size {}x{}).\nLogs go to --log-file (default {DEFAULT_LOG_FILE}, none for --print); RUST_LOG controls the level.",
        DEFAULT_PRINT_SIZE.0, DEFAULT_PRINT_SIZE.1
    );
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliOptions {
    demo: bool,
    print: bool,
    file: Option<String>,
    size: Option<(u16, u16)>,
    log_file: Option<String>,
}

impl CliOptions {
    /// Where the TUI logs. `--print` only logs when a log file is named explicitly.
    fn log_path(&self) -> Option<&str> {
        match (&self.log_file, self.print) {
            (Some(path), _) => Some(path.as_str()),
            (None, true) => None,
            (None, false) => Some(DEFAULT_LOG_FILE),
        }
    }
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--demo" => {
                if options.demo {
                    return Err(());
                }
                options.demo = true;
            }
            "--print" => {
                if options.print {
                    return Err(());
                }
                options.print = true;
            }
            "--size" => {
                if options.size.is_some() {
                    return Err(());
                }
                let raw = args.next().ok_or(())?;
                options.size = Some(parse_size(&raw).ok_or(())?);
            }
            "--log-file" => {
                if options.log_file.is_some() {
                    return Err(());
                }
                options.log_file = Some(args.next().ok_or(())?);
            }
            _ if arg.starts_with('-') => return Err(()),
            _ => {
                if options.file.is_some() {
                    return Err(());
                }
                options.file = Some(arg);
            }
        }
    }

    if options.demo && options.file.is_some() {
        return Err(());
    }

    if options.size.is_some() && !options.print {
        return Err(());
    }

    Ok(options)
}

/// Parses `<cols>x<rows>`; both must be non-zero.
fn parse_size(raw: &str) -> Option<(u16, u16)> {
    let (cols, rows) = raw.split_once(['x', 'X'])?;
    let cols: u16 = cols.trim().parse().ok()?;
    let rows: u16 = rows.trim().parse().ok()?;
    (cols > 0 && rows > 0).then_some((cols, rows))
}

fn init_logging(path: &str) -> Result<(), Box<dyn Error>> {
    let log_file = OpenOptions::new().write(true).truncate(true).create(true).open(path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(log_file))
        .with_ansi(false)
        .init();
    Ok(())
}

/// Loads `path`, or starts a one-node map named after the file when it does not exist yet.
fn open_map(file: &MindMapFile) -> Result<MindMapNode, Box<dyn Error>> {
    if file.path().exists() {
        return Ok(file.load()?);
    }
    let name = file
        .path()
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "Mind map".to_owned());
    info!(path = %file.path().display(), "starting a new mind map");
    Ok(MindMapNode::new(name))
}

fn main() {
    let result = (|| -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "nereid-mindmap".to_owned());

        let options = match parse_options(args) {
            Ok(options) => options,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };

        if let Some(path) = options.log_path() {
            init_logging(path)?;
        }

        let file = options.file.as_deref().map(|path| MindMapFile::new(Path::new(path)));
        let raw = match &file {
            Some(file) => open_map(file)?,
            None => nereid_mindmap::tui::demo_tree(),
        };

        if options.print {
            let (cols, rows) = options.size.unwrap_or(DEFAULT_PRINT_SIZE);
            let mut editor = MindMapEditor::new(&raw, EditorConfig::default().without_animation());
            println!("{}", nereid_mindmap::tui::print_frame(&mut editor, cols, rows)?);
            return Ok(());
        }

        let editor = MindMapEditor::new(&raw, EditorConfig::default());
        nereid_mindmap::tui::run(editor, file)
    })();

    if let Err(err) = result {
        eprintln!("nereid-mindmap: {err}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_options, parse_size, CliOptions, DEFAULT_LOG_FILE};

    fn args(list: &[&str]) -> impl Iterator<Item = String> {
        list.iter().map(|arg| (*arg).to_owned()).collect::<Vec<_>>().into_iter()
    }

    #[test]
    fn parses_empty_args() {
        let options = parse_options(std::iter::empty()).expect("parse options");
        assert_eq!(options, CliOptions::default());
    }

    #[test]
    fn parses_demo_flag() {
        let options = parse_options(args(&["--demo"])).expect("parse options");
        assert!(options.demo);
        assert!(options.file.is_none());
    }

    #[test]
    fn parses_file_and_log_file() {
        let options =
            parse_options(args(&["maps/math.json", "--log-file", "/tmp/m.log"])).expect("parse options");
        assert_eq!(options.file.as_deref(), Some("maps/math.json"));
        assert_eq!(options.log_file.as_deref(), Some("/tmp/m.log"));
        assert!(!options.print);
    }

    #[test]
    fn parses_print_with_size_in_any_order() {
        let options = parse_options(args(&["--size", "120x40", "--print", "--demo"])).expect("parse options");
        assert!(options.print);
        assert!(options.demo);
        assert_eq!(options.size, Some((120, 40)));
    }

    #[test]
    fn rejects_demo_with_file() {
        parse_options(args(&["--demo", "math.json"])).unwrap_err();
    }

    #[test]
    fn rejects_size_without_print() {
        parse_options(args(&["--size", "80x24"])).unwrap_err();
    }

    #[test]
    fn rejects_unknown_flags_and_duplicates() {
        parse_options(args(&["--mcp"])).unwrap_err();
        parse_options(args(&["--print", "--print"])).unwrap_err();
        parse_options(args(&["a.json", "b.json"])).unwrap_err();
        parse_options(args(&["--log-file"])).unwrap_err();
    }

    #[test]
    fn printing_writes_no_log_unless_asked() {
        let options = parse_options(args(&["--demo", "--print"])).expect("parse options");
        assert_eq!(options.log_path(), None);

        let options = parse_options(args(&["--print", "--log-file", "/tmp/m.log"])).expect("parse options");
        assert_eq!(options.log_path(), Some("/tmp/m.log"));

        let options = parse_options(args(&["--demo"])).expect("parse options");
        assert_eq!(options.log_path(), Some(DEFAULT_LOG_FILE));
    }

    #[test]
    fn parses_sizes() {
        assert_eq!(parse_size("80x24"), Some((80, 24)));
        assert_eq!(parse_size("80X24"), Some((80, 24)));
        assert_eq!(parse_size("0x24"), None);
        assert_eq!(parse_size("80"), None);
        assert_eq!(parse_size("wide x 24"), None);
    }
}
