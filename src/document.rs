use crate::error::LeafletError;
use crate::model::ScrapedRecipe;
use log::info;
use std::fmt;
use std::path::{Path, PathBuf};

/// A finished Cooklang document: metadata header followed by annotated instructions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookDocument {
    pub title: String,
    pub link: String,
    pub total_time: u32,
    pub image: String,
    /// Annotated instructions
    pub instructions: String,
}

impl CookDocument {
    pub fn new(recipe: &ScrapedRecipe, instructions: String) -> Self {
        Self {
            title: recipe.title.clone(),
            link: recipe.link.clone(),
            total_time: recipe.total_time,
            image: recipe.image.clone(),
            instructions,
        }
    }

    /// `<title>.cook`, with characters that would leave the directory replaced
    pub fn file_name(&self) -> String {
        let title: String = self
            .title
            .trim()
            .chars()
            .map(|c| match c {
                '/' | '\\' | '\0' => '-',
                c => c,
            })
            .collect();
        let title = title.trim_start_matches('.');
        if title.is_empty() {
            "recipe.cook".to_string()
        } else {
            format!("{title}.cook")
        }
    }

    /// Write the document into `dir`, returning the path written
    pub async fn save(&self, dir: &Path) -> Result<PathBuf, LeafletError> {
        let path = dir.join(self.file_name());
        tokio::fs::write(&path, format!("{self}\n")).await?;
        info!("Wrote {}", path.display());
        Ok(path)
    }
}

/// Where finished documents go
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    Stdout,
    /// One `<title>.cook` file per recipe in this directory
    Directory(PathBuf),
}

impl OutputTarget {
    /// Emit the document, returning the file path when one was written
    pub async fn write(&self, document: &CookDocument) -> Result<Option<PathBuf>, LeafletError> {
        match self {
            OutputTarget::Stdout => {
                println!("{document}");
                Ok(None)
            }
            OutputTarget::Directory(dir) => document.save(dir).await.map(Some),
        }
    }
}

impl fmt::Display for CookDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, ">> source: {}", self.link)?;
        writeln!(f, ">> time required: {} minutes", self.total_time)?;
        writeln!(f, ">> image: {}", self.image)?;
        write!(f, "\n{}", self.instructions)
    }
}
