//! nomalign - reconcile detector output with a reference transcription.
//!
//! Reads per-page detector label files (with optional glyph-box files
//! alongside), the page's reference sentences, and the two similarity
//! dictionaries; recovers reading order, aligns, and writes the annotated
//! review table as TSV or JSON.
//!
//! File conventions, per page label file `X_label.txt`:
//! - `X_char_bbox.txt`  - glyph boxes (`cx cy w h` per line), optional
//! - `X_reference.txt`  - reference sentences, one per line, optional

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use nomalign_core::report::{GlyphRecord, Summary};
use nomalign_core::{
    GlyphSimilarity, PageInput, ReconcileOptions, WordGlyphs, dict, input, reconcile_pages,
};
use serde_json::json;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Output format for the review table.
#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    /// Tab-separated rows (default)
    #[default]
    Tsv,
    /// JSON array of row objects plus a summary
    Json,
}

/// Reconcile OCR label files with reference transcriptions.
#[derive(Parser, Debug)]
#[command(name = "nomalign")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// One or more detector label files, one page each
    #[arg(required = true)]
    pages: Vec<PathBuf>,

    /// Glyph-similarity dictionary (TSV: glyph<TAB>similar glyphs)
    #[arg(long = "glyph-dict")]
    glyph_dict: Option<PathBuf>,

    /// Word-to-glyph dictionary (TSV: word<TAB>glyph)
    #[arg(long = "word-dict")]
    word_dict: Option<PathBuf>,

    /// Keep stacked regions separate instead of merging each column
    #[arg(long = "no-merge", action = ArgAction::SetTrue)]
    no_merge: bool,

    /// Snap tolerance, in words, for line pairing
    #[arg(long = "snap-tolerance", default_value = "3")]
    snap_tolerance: i64,

    /// Path to file where output is written, or "-" for stdout
    #[arg(short = 'o', long, default_value = "-")]
    outfile: String,

    /// Output format
    #[arg(short = 't', long = "output-format", value_enum, default_value = "tsv")]
    format: OutputFormat,

    /// Use debug logging level
    #[arg(short = 'd', long, action = ArgAction::SetTrue)]
    debug: bool,
}

/// Splits `X_label.txt` into a document stem and page number. A trailing
/// `_pageNNN` in the stem supplies the page number; otherwise the 1-based
/// position in the argument list is used.
fn stem_and_page(path: &Path, position: usize) -> (String, u32) {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let base = name.strip_suffix("_label.txt").unwrap_or(&name);
    if let Some(idx) = base.rfind("_page") {
        let digits = &base[idx + 5..];
        if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) {
            if let Ok(page) = digits.parse() {
                return (base[..idx].to_string(), page);
            }
        }
    }
    (base.to_string(), position as u32 + 1)
}

/// Reads the optional sibling file derived by swapping the label suffix.
fn sibling(path: &Path, suffix: &str) -> Option<String> {
    let name = path.file_name()?.to_string_lossy().into_owned();
    let base = name.strip_suffix("_label.txt")?;
    let candidate = path.with_file_name(format!("{base}{suffix}"));
    fs::read_to_string(candidate).ok()
}

fn load_page(path: &Path, position: usize) -> Result<PageInput> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read label file {}", path.display()))?;
    let regions = input::parse_label_text(&content)
        .with_context(|| format!("failed to parse {}", path.display()))?;

    let glyph_boxes = match sibling(path, "_char_bbox.txt") {
        Some(content) => input::parse_glyph_boxes(&content)
            .with_context(|| format!("failed to parse glyph boxes for {}", path.display()))?,
        None => Vec::new(),
    };

    let reference_lines: Vec<String> = sibling(path, "_reference.txt")
        .map(|content| content.lines().map(str::to_string).collect())
        .unwrap_or_default();

    let (stem, page_number) = stem_and_page(path, position);
    Ok(PageInput {
        stem,
        page_number,
        regions,
        glyph_boxes,
        reference_lines,
    })
}

fn load_dictionaries(args: &Args) -> Result<(GlyphSimilarity, WordGlyphs)> {
    let similar = match &args.glyph_dict {
        Some(path) => {
            let content = fs::read_to_string(path)
                .with_context(|| format!("failed to read glyph dictionary {}", path.display()))?;
            dict::parse_glyph_table(&content)?
        }
        None => GlyphSimilarity::default(),
    };
    let word_glyphs = match &args.word_dict {
        Some(path) => {
            let content = fs::read_to_string(path)
                .with_context(|| format!("failed to read word dictionary {}", path.display()))?;
            dict::parse_word_table(&content)?
        }
        None => WordGlyphs::default(),
    };
    Ok((similar, word_glyphs))
}

fn write_tsv(out: &mut dyn Write, records: &[GlyphRecord]) -> io::Result<()> {
    writeln!(
        out,
        "image_id\tregion_id\tgeometry\tgeometry_mark\tglyph\tmark\treference"
    )?;
    for record in records {
        writeln!(
            out,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}",
            record.image_id,
            record.region_id,
            record.geometry.as_deref().unwrap_or(""),
            if record.missing_reference { 'g' } else { 'n' },
            record.glyph.map(String::from).unwrap_or_default(),
            record.mark.map(|m| m.code().to_string()).unwrap_or_default(),
            record.reference.as_deref().unwrap_or(""),
        )?;
    }
    Ok(())
}

fn write_json(out: &mut dyn Write, records: &[GlyphRecord], summary: &Summary) -> Result<()> {
    let rows: Vec<serde_json::Value> = records
        .iter()
        .map(|record| {
            json!({
                "image_id": record.image_id,
                "region_id": record.region_id,
                "geometry": record.geometry,
                "geometry_mark": if record.missing_reference { "g" } else { "n" },
                "glyph": record.glyph.map(String::from),
                "mark": record.mark.map(|m| m.code().to_string()),
                "reference": record.reference.as_deref(),
            })
        })
        .collect();
    let doc = json!({
        "rows": rows,
        "summary": {
            "mismatches": summary.mismatches,
            "kept": summary.kept,
            "insertions": summary.insertions,
            "deletions": summary.deletions,
            "mismatch_rate": summary.mismatch_rate(),
            "insertion_deletion_rate": summary.insertion_deletion_rate(),
        },
    });
    serde_json::to_writer_pretty(&mut *out, &doc)?;
    writeln!(out)?;
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(if args.debug { "debug" } else { "info" }),
    )
    .init();

    let (similar, word_glyphs) = load_dictionaries(&args)?;
    log::debug!(
        "loaded {} glyph entries, {} word entries",
        similar.len(),
        word_glyphs.len()
    );

    let pages: Vec<PageInput> = args
        .pages
        .iter()
        .enumerate()
        .map(|(position, path)| load_page(path, position))
        .collect::<Result<_>>()?;

    let options = ReconcileOptions {
        merge_stacks: !args.no_merge,
        snap_tolerance: args.snap_tolerance,
    };

    let reconciled = reconcile_pages(&pages, &similar, &word_glyphs, &options)?;
    let records: Vec<GlyphRecord> = reconciled
        .into_iter()
        .flat_map(|page| page.records)
        .collect();
    let summary = Summary::from_records(&records);

    let mut output: Box<dyn Write> = if args.outfile == "-" {
        Box::new(BufWriter::new(io::stdout()))
    } else {
        let file = File::create(&args.outfile)
            .with_context(|| format!("failed to create output file {}", args.outfile))?;
        Box::new(BufWriter::new(file))
    };

    match args.format {
        OutputFormat::Tsv => write_tsv(&mut output, &records)?,
        OutputFormat::Json => write_json(&mut output, &records, &summary)?,
    }
    output.flush()?;

    eprintln!("{summary}");
    Ok(())
}
