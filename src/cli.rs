//! Command line front end of the `icon2png` binary.
//!
//! Only built with the `bin` feature. [`render_icon`] runs the whole pipeline
//! for one parsed [`Args`] and reports failures as `anyhow` errors with the
//! offending path or icon in the message.

use std::ffi::OsStr;
use std::fs;
use std::num::NonZeroU32;
use std::path::{Path, PathBuf};

use anyhow::{bail, ensure, Context};
use clap::Parser;
use log::{info, warn, LevelFilter};

use crate::fit::Alignment;
use crate::font::{FontHandle, DEFAULT_FAMILY};
use crate::meta::IconMetadata;
use crate::render::{render, RenderRequest, DEFAULT_SIZE};
use crate::resolve::resolve;
use crate::stylesheet::parse_stylesheet;

/// Command line arguments of the `icon2png` tool.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// The stylesheet to load icon names from
    #[arg(long)]
    pub css: PathBuf,
    /// The TTF file to load icons from
    #[arg(long)]
    pub ttf: PathBuf,
    /// The directory to output the file in
    #[arg(long)]
    pub outdir: PathBuf,
    /// The icon to render, without the `fa-` prefix
    #[arg(long)]
    pub icon: String,
    /// Side length of the square output image in pixels
    #[arg(
        long,
        default_value_t = DEFAULT_SIZE,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub size: u32,
    /// Placement of the glyph along its shorter axis
    #[arg(long, value_enum, default_value_t = Alignment::Center)]
    pub align: Alignment,
    /// Family name the font is known by
    #[arg(long, default_value = DEFAULT_FAMILY)]
    pub family: String,
    /// Also write render metadata to this path (.ron or .json)
    #[arg(long)]
    pub meta: Option<PathBuf>,
    /// Log more; repeat for more detail
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Log level selected by the number of `-v` flags.
    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MetaFormat {
    Ron,
    Json,
}

impl MetaFormat {
    fn from_path(path: &Path) -> anyhow::Result<Self> {
        match path.extension().and_then(OsStr::to_str) {
            Some("ron") => Ok(Self::Ron),
            Some("json") => Ok(Self::Json),
            _ => bail!(
                "cannot deduce metadata format from {}; supported formats are ron and json",
                path.display()
            ),
        }
    }

    fn serialize(self, meta: &IconMetadata) -> anyhow::Result<String> {
        Ok(match self {
            Self::Ron => ron::ser::to_string_pretty(meta, ron::ser::PrettyConfig::default())?,
            Self::Json => serde_json::to_string_pretty(meta)?,
        })
    }
}

/// Resolve, render and write the icon described by `args`.
///
/// All inputs, including the directory of the metadata file, are checked
/// before the stylesheet is parsed. Nothing is written unless the render and
/// the metadata serialization succeed, and the PNG is removed again if the
/// metadata cannot be written. Returns the path of the PNG.
pub fn render_icon(args: &Args) -> anyhow::Result<PathBuf> {
    let css = fs::read_to_string(&args.css)
        .with_context(|| format!("cannot read stylesheet {}", args.css.display()))?;
    ensure!(args.ttf.is_file(), "font file {} does not exist", args.ttf.display());
    ensure!(
        args.outdir.is_dir(),
        "output directory {} does not exist",
        args.outdir.display()
    );
    ensure!(
        !args.icon.is_empty() && !args.icon.contains(&['/', '\\'][..]),
        "invalid icon name `{}`",
        args.icon
    );
    let meta_format = args.meta.as_deref().map(check_meta_path).transpose()?;
    let size = NonZeroU32::new(args.size).context("size must be greater than zero")?;

    let rules = parse_stylesheet(&css);
    let code_point = resolve(&rules, &args.icon)?;
    info!("icon `{}` is U+{:04X}", args.icon, u32::from(code_point));

    let font = FontHandle::load(&args.ttf, args.family.as_str())?;
    let request = RenderRequest::new(code_point, size).with_alignment(args.align);
    let mut canvas = font.canvas(size);
    let rendered = render(&mut canvas, &request)
        .with_context(|| format!("cannot render icon `{}`", args.icon))?;

    let meta = match (&args.meta, meta_format) {
        (Some(path), Some(format)) => {
            let meta = IconMetadata::new(&args.icon, font.family(), &request, &rendered);
            Some((path, format.serialize(&meta)?))
        }
        _ => None,
    };

    let out_path = args.outdir.join(format!("{}.png", args.icon));
    fs::write(&out_path, &rendered.png)
        .with_context(|| format!("cannot write {}", out_path.display()))?;
    info!("wrote {}", out_path.display());

    if let Some((meta_path, text)) = meta {
        if let Err(err) = fs::write(meta_path, text) {
            if let Err(cleanup) = fs::remove_file(&out_path) {
                warn!("cannot remove {}: {cleanup}", out_path.display());
            }
            return Err(err)
                .with_context(|| format!("cannot write metadata {}", meta_path.display()));
        }
        info!("wrote {}", meta_path.display());
    }

    Ok(out_path)
}

/// Format of the metadata file at `path`, provided its directory exists.
fn check_meta_path(path: &Path) -> anyhow::Result<MetaFormat> {
    let format = MetaFormat::from_path(path)?;
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    ensure!(dir.is_dir(), "metadata directory {} does not exist", dir.display());
    Ok(format)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: [&str; 9] = [
        "icon2png", "--css", "a.css", "--ttf", "a.ttf", "--outdir", ".", "--icon", "gear",
    ];

    fn args(extra: &[&str]) -> Args {
        Args::try_parse_from(BASE.iter().chain(extra)).unwrap()
    }

    #[test]
    fn defaults() {
        let args = args(&[]);
        assert_eq!(args.size, 250);
        assert_eq!(args.align, Alignment::Center);
        assert_eq!(args.family, "Font Awesome");
        assert_eq!(args.meta, None);
        assert_eq!(args.log_level(), LevelFilter::Warn);
    }

    #[test]
    fn parses_options() {
        let args = args(&["--size", "100", "--align", "top-left", "-vv", "--meta", "gear.json"]);
        assert_eq!(args.size, 100);
        assert_eq!(args.align, Alignment::TopLeft);
        assert_eq!(args.log_level(), LevelFilter::Debug);
        assert_eq!(args.meta.as_deref(), Some(Path::new("gear.json")));
    }

    #[test]
    fn rejects_zero_size_and_missing_flags() {
        assert!(Args::try_parse_from(BASE.iter().chain(&["--size", "0"])).is_err());
        assert!(Args::try_parse_from(&BASE[..7]).is_err());
    }

    #[test]
    fn meta_format_from_extension() {
        assert_eq!(MetaFormat::from_path(Path::new("out/gear.ron")).unwrap(), MetaFormat::Ron);
        assert_eq!(MetaFormat::from_path(Path::new("gear.json")).unwrap(), MetaFormat::Json);
        assert!(MetaFormat::from_path(Path::new("gear.yaml")).is_err());
        assert!(MetaFormat::from_path(Path::new("gear")).is_err());
    }

    #[test]
    fn checks_inputs_before_parsing() {
        let dir = tempfile::tempdir().unwrap();
        let css = dir.path().join("icons.css");
        let ttf = dir.path().join("icons.ttf");
        fs::write(&css, r#".fa-gear{--fa:"\f013"}"#).unwrap();
        fs::write(&ttf, b"not a font").unwrap();

        let mut args = args(&[]);
        args.css = dir.path().join("missing.css");
        args.ttf = ttf.clone();
        args.outdir = dir.path().to_owned();
        let err = render_icon(&args).unwrap_err();
        assert!(err.to_string().contains("cannot read stylesheet"), "{err:#}");

        args.css = css;
        args.ttf = dir.path().join("missing.ttf");
        let err = render_icon(&args).unwrap_err();
        assert!(err.to_string().contains("font file"), "{err:#}");

        args.ttf = ttf;
        args.outdir = dir.path().join("missing");
        let err = render_icon(&args).unwrap_err();
        assert!(err.to_string().contains("output directory"), "{err:#}");

        args.outdir = dir.path().to_owned();
        args.meta = Some(dir.path().join("gear.txt"));
        let err = render_icon(&args).unwrap_err();
        assert!(err.to_string().contains("metadata format"), "{err:#}");

        args.meta = Some(dir.path().join("nope").join("gear.json"));
        let err = render_icon(&args).unwrap_err();
        assert!(err.to_string().contains("metadata directory"), "{err:#}");
        assert!(!dir.path().join("gear.png").exists());

        args.meta = None;
        args.icon = "../gear".into();
        let err = render_icon(&args).unwrap_err();
        assert!(err.to_string().contains("invalid icon name"), "{err:#}");
    }

    #[test]
    fn unknown_icon_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let css = dir.path().join("icons.css");
        let ttf = dir.path().join("icons.ttf");
        fs::write(&css, r#".fa-gear{--fa:"\f013"}"#).unwrap();
        fs::write(&ttf, b"not a font").unwrap();

        let mut args = args(&[]);
        args.css = css;
        args.ttf = ttf;
        args.outdir = dir.path().to_owned();
        args.icon = "doesnotexist".into();

        let err = render_icon(&args).unwrap_err();
        assert_eq!(err.to_string(), "icon `doesnotexist` not found in stylesheet");
        assert!(!dir.path().join("doesnotexist.png").exists());
    }

    #[test]
    fn unusable_font_is_reported_after_resolution() {
        let dir = tempfile::tempdir().unwrap();
        let css = dir.path().join("icons.css");
        let ttf = dir.path().join("icons.ttf");
        fs::write(&css, r#".fa-gear{--fa:"\f013"}"#).unwrap();
        fs::write(&ttf, b"not a font").unwrap();

        let mut args = args(&[]);
        args.css = css;
        args.ttf = ttf;
        args.outdir = dir.path().to_owned();

        let err = render_icon(&args).unwrap_err();
        assert!(err.to_string().contains("could not be parsed"), "{err:#}");
        assert!(!dir.path().join("gear.png").exists());
    }

    #[test]
    fn renders_and_writes_metadata() {
        let Some(font_path) = crate::test_fonts::system_font() else {
            return;
        };
        let dir = tempfile::tempdir().unwrap();
        let css = dir.path().join("icons.css");
        fs::write(&css, ".fa-letter-h{--fa:\"\\48\"}\n.fa-space{--fa:\"\\20\"}").unwrap();

        let mut args = args(&["--size", "64"]);
        args.meta = Some(dir.path().join("letter-h.json"));
        args.css = css;
        args.ttf = font_path;
        args.outdir = dir.path().to_owned();
        args.icon = "letter-h".into();

        let out = render_icon(&args).unwrap();
        assert_eq!(out, dir.path().join("letter-h.png"));
        let image = image::open(&out).unwrap();
        assert_eq!((image.width(), image.height()), (64, 64));

        let text = fs::read_to_string(dir.path().join("letter-h.json")).unwrap();
        let meta: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(meta["icon"], "letter-h");
        assert_eq!(meta["code_point"], "H");
        assert_eq!(meta["size"], 64);
        assert_eq!(meta["alignment"], "Center");

        args.icon = "space".into();
        args.meta = None;
        let err = render_icon(&args).unwrap_err();
        assert!(format!("{err:#}").contains("no ink"), "{err:#}");
        assert!(!dir.path().join("space.png").exists());
    }

    #[test]
    fn failed_metadata_write_removes_png() {
        let Some(font_path) = crate::test_fonts::system_font() else {
            return;
        };
        let dir = tempfile::tempdir().unwrap();
        let css = dir.path().join("icons.css");
        fs::write(&css, ".fa-letter-h{--fa:\"\\48\"}").unwrap();
        // a directory in place of the metadata file passes the input checks
        let taken = dir.path().join("taken.json");
        fs::create_dir(&taken).unwrap();

        let mut args = args(&["--size", "32"]);
        args.css = css;
        args.ttf = font_path;
        args.outdir = dir.path().to_owned();
        args.icon = "letter-h".into();
        args.meta = Some(taken);

        let err = render_icon(&args).unwrap_err();
        assert!(err.to_string().contains("cannot write metadata"), "{err:#}");
        assert!(!dir.path().join("letter-h.png").exists());
    }
}
