// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
#[allow(dead_code)]
pub fn generate_markdown_content(size: usize) -> String {
    let base = "# Title\n\n## Section\n\nParagraph with *some* **content** and `code`.\n\n- Bullet point\n    - Nested item\n- Another item\n\n1. first\n1. second\n\n> quoted line\n> continued [link](http://example.com)\n\n| a | b |\n| --- | --: |\n| 1 | 2 |\n\n```rust\nfn example() {\n    println!(\"Hello\");\n}\n```\n\n";
    base.repeat(size)
}

#[allow(dead_code)]
pub fn generate_reference_heavy(size: usize) -> String {
    let mut content = String::new();
    for i in 0..size {
        content.push_str(&format!("See [item {i}][ref{i}] and ![icon](/i{i}.png).\n\n"));
    }
    for i in 0..size {
        content.push_str(&format!("[ref{i}]: http://example.com/{i} \"Item {i}\"\n"));
    }
    content
}

#[allow(dead_code)]
pub fn generate_unmatched_delimiters(size: usize) -> String {
    "a * b _ c ~~ d ` e [ f ".repeat(size)
}
