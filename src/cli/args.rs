use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "docsift", version)]
pub struct Cli {
    /// Documents to extract (pdf, docx, pptx, txt, md, png, jpg, jpeg)
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Append a summary line with topics, clusters, and prompt suggestions
    #[arg(long)]
    pub summary: bool,

    /// Number of parallel workers (default: CPU count)
    #[arg(long)]
    pub jobs: Option<usize>,

    /// Emit progress to stderr
    #[arg(long)]
    pub progress: bool,

    /// Print operator.json and exit
    #[arg(long)]
    pub describe: bool,

    /// Tesseract language for image OCR
    #[arg(long, value_name = "LANG", env = "DOCSIFT_OCR_LANG", default_value = "eng")]
    pub ocr_lang: String,

    /// Tesseract binary name or path
    #[arg(
        long,
        value_name = "PATH",
        env = "DOCSIFT_TESSERACT",
        default_value = "tesseract"
    )]
    pub tesseract: String,
}

#[cfg(test)]
mod tests {
    use super::Cli;
    use clap::Parser;
    use std::path::PathBuf;

    #[test]
    fn parses_files_and_flags() {
        let cli = Cli::try_parse_from([
            "docsift",
            "--summary",
            "--jobs",
            "3",
            "a.pdf",
            "b.txt",
            "--ocr-lang",
            "deu",
        ])
        .expect("parse args");

        assert_eq!(cli.files, vec![PathBuf::from("a.pdf"), PathBuf::from("b.txt")]);
        assert!(cli.summary);
        assert_eq!(cli.jobs, Some(3));
        assert_eq!(cli.ocr_lang, "deu");
        assert!(!cli.progress);
    }

    #[test]
    fn files_are_optional_for_describe() {
        let cli = Cli::try_parse_from(["docsift", "--describe"]).expect("parse args");
        assert!(cli.describe);
        assert!(cli.files.is_empty());
    }
}
