use std::fs;
use std::path::{Path, PathBuf};

use log::info;

use crate::error::{Error, Result};
use crate::page::render_page;

/// Where a site build reads from and writes to.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    pub content: PathBuf,
    pub static_dir: PathBuf,
    pub public: PathBuf,
    pub template: PathBuf,
}

/// One markdown file turned into HTML.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedPage {
    pub source: PathBuf,
    pub dest: PathBuf,
    pub links: Vec<String>,
}

/// Wipes `public`, copies the static tree in, then renders all content pages.
pub fn build(config: &SiteConfig) -> Result<Vec<GeneratedPage>> {
    if config.public.exists() {
        clear_dir(&config.public)?;
    } else {
        fs::create_dir_all(&config.public).map_err(|e| Error::io(&config.public, e))?;
    }
    if config.static_dir.exists() {
        copy_dir(&config.static_dir, &config.public)?;
    }
    let template =
        fs::read_to_string(&config.template).map_err(|e| Error::io(&config.template, e))?;
    let mut pages = Vec::new();
    generate_pages(&config.content, &template, &config.public, &mut pages)?;
    info!("generated {} pages", pages.len());
    Ok(pages)
}

/// Removes everything inside `dir`, keeping `dir` itself.
pub fn clear_dir(dir: &Path) -> Result<()> {
    for entry in fs::read_dir(dir).map_err(|e| Error::io(dir, e))? {
        let path = entry.map_err(|e| Error::io(dir, e))?.path();
        if path.is_dir() {
            fs::remove_dir_all(&path).map_err(|e| Error::io(&path, e))?;
        } else {
            fs::remove_file(&path).map_err(|e| Error::io(&path, e))?;
        }
    }
    info!("deleted contents of {}", dir.display());
    Ok(())
}

pub fn copy_dir(src: &Path, dst: &Path) -> Result<()> {
    fs::create_dir_all(dst).map_err(|e| Error::io(dst, e))?;
    for entry in fs::read_dir(src).map_err(|e| Error::io(src, e))? {
        let from = entry.map_err(|e| Error::io(src, e))?.path();
        let Some(name) = from.file_name() else {
            continue;
        };
        let to = dst.join(name);
        if from.is_dir() {
            copy_dir(&from, &to)?;
        } else {
            fs::copy(&from, &to).map_err(|e| Error::io(&from, e))?;
            info!("copied {} to {}", from.display(), to.display());
        }
    }
    Ok(())
}

pub fn generate_page(source: &Path, template: &str, dest: &Path) -> Result<GeneratedPage> {
    info!("generating page from {} to {}", source.display(), dest.display());
    let markdown = fs::read_to_string(source).map_err(|e| Error::io(source, e))?;
    let page = render_page(&markdown, template)?;
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }
    fs::write(dest, &page.html).map_err(|e| Error::io(dest, e))?;
    Ok(GeneratedPage {
        source: source.to_path_buf(),
        dest: dest.to_path_buf(),
        links: page.links,
    })
}

fn generate_pages(
    dir: &Path,
    template: &str,
    dest_dir: &Path,
    pages: &mut Vec<GeneratedPage>,
) -> Result<()> {
    let mut entries = fs::read_dir(dir)
        .map_err(|e| Error::io(dir, e))?
        .map(|entry| entry.map(|entry| entry.path()))
        .collect::<std::io::Result<Vec<PathBuf>>>()
        .map_err(|e| Error::io(dir, e))?;
    entries.sort();
    for path in entries {
        let Some(name) = path.file_name() else {
            continue;
        };
        if path.is_dir() {
            generate_pages(&path, template, &dest_dir.join(name), pages)?;
        } else if path.extension().is_some_and(|ext| ext == "md") {
            let dest = dest_dir.join(name).with_extension("html");
            pages.push(generate_page(&path, template, &dest)?);
        }
    }
    Ok(())
}
