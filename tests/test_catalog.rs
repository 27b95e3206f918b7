use std::fs;
use std::path::Path;

use recipe_box::{Catalog, CatalogError};
use tempfile::TempDir;

fn write(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(name), content).unwrap();
}

fn library() -> TempDir {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "b_soup.txt",
        "---\ncategory: Soup\nfavorite: yes\n---\n= Tomato Soup\n# Simmer\n",
    );
    write(dir.path(), "a_toast.txt", "= Toast\n# Toast the bread\n");
    write(dir.path(), "c_broken.txt", "- orphan\n# step\n");
    write(dir.path(), "d_empty.txt", "   \n");
    write(dir.path(), "notes.md", "= Not a recipe file\n# Ignored\n");
    fs::create_dir(dir.path().join("nested.txt")).unwrap();
    dir
}

#[test]
fn test_load_skips_malformed_and_foreign_files() {
    let dir = library();
    let catalog = Catalog::load(dir.path(), "txt").unwrap();

    assert_eq!(catalog.len(), 2);
    let titles: Vec<_> = catalog.recipes().iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, ["Toast", "Tomato Soup"]);
}

#[test]
fn test_ids_follow_file_name_order() {
    let dir = library();
    let catalog = Catalog::load(dir.path(), "txt").unwrap();

    assert_eq!(catalog.get(1).unwrap().title, "Toast");
    assert_eq!(catalog.get(2).unwrap().title, "Tomato Soup");
    assert!(catalog.get(3).is_none());
}

#[test]
fn test_groups_by_category() {
    let dir = library();
    let catalog = Catalog::load(dir.path(), "txt").unwrap();
    let groups = catalog.groups();

    let categories: Vec<_> = groups.iter().map(|g| g.category).collect();
    assert_eq!(categories, ["Soup", "Uncategorized"]);
    assert_eq!(groups[0].recipes[0].favorite(), Some("yes"));
}

#[test]
fn test_other_extension() {
    let dir = library();
    let catalog = Catalog::load(dir.path(), "md").unwrap();
    assert_eq!(catalog.len(), 1);
    assert_eq!(catalog.filter("recipe")[0].recipes[0].title, "Not a recipe file");
}

#[test]
fn test_missing_folder() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("does-not-exist");
    assert!(matches!(
        Catalog::load(&missing, "txt"),
        Err(CatalogError::Io { .. })
    ));
}
