use anyhow::Result;
use hunk_diff::{DiffConfig, FileFormat, LineWindow, SignAlgorithm};
use log::info;

fn main() -> Result<()> {
    env_logger::init();

    let old = "fn main() {\n    let x = 1;\n    println!(\"{}\", x);\n}\n";
    let new = "// entry point\nfn main() {\n    let x = 2;\n    let y = x * 2;\n    println!(\"{}\", y);\n}\n";

    for algorithm in [SignAlgorithm::Baseline, SignAlgorithm::Refined] {
        let diff = DiffConfig::default()
            .sign_algorithm(algorithm)
            .word_diff(true)
            .diff(old, new)?;
        info!("{} hunks with {} signs", diff.hunk_count(), algorithm);

        println!("=== {} signs ===", algorithm);
        for sign in diff.signs(LineWindow::unbounded()) {
            match sign.count {
                Some(count) => println!("{:>4} {} ({})", sign.line_number, sign.kind, count),
                None => println!("{:>4} {}", sign.line_number, sign.kind),
            }
        }
        println!("summary: {}", diff.summary());
    }

    println!("\n=== Preview ===");
    let diff = DiffConfig::default().word_diff(true).diff(old, new)?;
    for (index, hunk) in diff.hunks().iter().enumerate() {
        println!("{}", hunk.header);
        for line in diff.highlighted_lines(index, FileFormat::Unix).unwrap_or_default() {
            let inline: Vec<String> = line
                .marks
                .iter()
                .skip(1)
                .map(|m| format!("{}..{}", m.start_col, m.end_col.unwrap_or(line.text.len())))
                .collect();
            println!("{:<30} {}", line.text, inline.join(" "));
        }
    }

    Ok(())
}
