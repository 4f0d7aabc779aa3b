use treeprint::{PrintConfig, Tree};

fn main() -> std::io::Result<()> {
    let mut tree = Tree::<String>::new();
    {
        let mut root = tree.root_mut();
        root.append_leaf_with_meta("file".to_owned(), "Cargo.toml".to_owned());
        let mut src = root.append_branch_with_meta("dir".to_owned(), "src".to_owned());
        src.append_leaf("lib.rs".to_owned())
            .append_leaf("render.rs".to_owned());
        src.append_branch("third_party".to_owned())
            .append_leaf("ratatui.rs".to_owned());
        src.append_leaf("notes\nspanning\nlines".to_owned());
        root.append_leaf("README.md".to_owned());
    }

    println!("{tree}");

    let config = PrintConfig::new()
        .meta(|meta: &String, out: &mut String| out.push_str(&meta.to_uppercase()))
        .value(|value: &String, out: &mut String| out.push_str(&format!("\"{value}\"")));
    tree.root().write_to(std::io::stdout().lock(), &config)?;

    treeprint::set_indent_size(1);
    println!();
    print!("{tree}");
    Ok(())
}
