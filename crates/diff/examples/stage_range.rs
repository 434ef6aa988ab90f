use anyhow::{Context, Result};
use hunk_diff::{create_patch, filter_common, BufferDiff};

fn main() -> Result<()> {
    env_logger::init();

    let head = "one\ntwo\nthree\nfour\nfive\n";
    let index = "one\nTWO\nthree\nfour\nfive\n";
    let work = "one\nTWO\nthree\nfour\nfour and a half\nfive\nsix\n";

    let staged = BufferDiff::new(head, index)?;
    let unstaged = BufferDiff::new(head, work)?;

    // Hunks still to stage, ignoring what the index already has
    let pending = filter_common(unstaged.hunks(), staged.hunks());
    println!("{} of {} hunks pending", pending.len(), unstaged.hunk_count());

    // Stage only "four and a half"
    let index_to_work = BufferDiff::new(index, work)?;
    let mut hunk = index_to_work
        .partial_hunk(5, 5)
        .context("line 5 should be modified")?;
    hunk.added.lines = vec!["four and a half".to_string()];

    let patch = create_patch("numbers.txt", &[hunk], "100644", false);
    print!("{}", patch.to_text());

    println!("\n=== Reverse of the whole working tree diff ===");
    print!("{}", index_to_work.patch("numbers.txt", "100644", true).to_text());

    Ok(())
}
