use crate::error::InterchangeError;
use core_types::EntityKind;
use std::path::{Path, PathBuf};

pub(crate) const ALL_KINDS: [EntityKind; 3] =
    [EntityKind::Customer, EntityKind::Product, EntityKind::Order];

/// Where and how a transfer reads or writes, decided from the path and the
/// optional collection filter.
///
/// | path            | no filter      | filter `k`                 |
/// |-----------------|----------------|----------------------------|
/// | `*.json`        | `JsonSnapshot` | `JsonCollection(k)`        |
/// | `*.csv`         | kind from stem | `CsvCollection(k)`         |
/// | no extension    | `CsvDirectory` | `<dir>/<k>.csv`            |
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// One JSON document holding every collection.
    JsonSnapshot(PathBuf),
    /// A JSON array of a single collection.
    JsonCollection(PathBuf, EntityKind),
    /// A CSV file of a single collection.
    CsvCollection(PathBuf, EntityKind),
    /// A directory with `customers.csv`, `products.csv` and `orders.csv`.
    CsvDirectory(PathBuf),
}

impl Target {
    pub fn resolve(path: &Path, only: Option<EntityKind>) -> Result<Self, InterchangeError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        match (extension.as_deref(), only) {
            (Some("json"), None) => Ok(Target::JsonSnapshot(path.to_path_buf())),
            (Some("json"), Some(kind)) => Ok(Target::JsonCollection(path.to_path_buf(), kind)),
            (Some("csv"), Some(kind)) => Ok(Target::CsvCollection(path.to_path_buf(), kind)),
            (Some("csv"), None) => kind_from_stem(path)
                .map(|kind| Target::CsvCollection(path.to_path_buf(), kind))
                .ok_or_else(|| InterchangeError::UnknownCollection(path.to_path_buf())),
            (None, None) => Ok(Target::CsvDirectory(path.to_path_buf())),
            (None, Some(kind)) => Ok(Target::CsvCollection(csv_file_in(path, kind), kind)),
            (Some(other), _) => Err(InterchangeError::UnsupportedFormat(other.to_string())),
        }
    }

    /// Whether the target carries every collection. Importing such a target
    /// replaces the store; anything narrower is merged into it.
    pub fn is_complete(&self) -> bool {
        matches!(self, Target::JsonSnapshot(_) | Target::CsvDirectory(_))
    }

    pub fn path(&self) -> &Path {
        match self {
            Target::JsonSnapshot(path)
            | Target::JsonCollection(path, _)
            | Target::CsvCollection(path, _)
            | Target::CsvDirectory(path) => path,
        }
    }
}

pub(crate) fn csv_file_in(dir: &Path, kind: EntityKind) -> PathBuf {
    dir.join(format!("{}.csv", kind.file_stem()))
}

fn kind_from_stem(path: &Path) -> Option<EntityKind> {
    let stem = path.file_stem()?.to_str()?.to_ascii_lowercase();
    ALL_KINDS.into_iter().find(|kind| kind.file_stem() == stem)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_paths() {
        let path = Path::new("backup/All.JSON");
        assert_eq!(
            Target::resolve(path, None).unwrap(),
            Target::JsonSnapshot(path.to_path_buf())
        );
        assert_eq!(
            Target::resolve(path, Some(EntityKind::Product)).unwrap(),
            Target::JsonCollection(path.to_path_buf(), EntityKind::Product)
        );
    }

    #[test]
    fn csv_kind_comes_from_file_name() {
        let path = Path::new("out/orders.csv");
        assert_eq!(
            Target::resolve(path, None).unwrap(),
            Target::CsvCollection(path.to_path_buf(), EntityKind::Order)
        );
        assert!(matches!(
            Target::resolve(Path::new("out/stuff.csv"), None),
            Err(InterchangeError::UnknownCollection(_))
        ));
    }

    #[test]
    fn directories_hold_csv_files() {
        let dir = Path::new("out");
        assert_eq!(
            Target::resolve(dir, None).unwrap(),
            Target::CsvDirectory(dir.to_path_buf())
        );
        assert_eq!(
            Target::resolve(dir, Some(EntityKind::Customer)).unwrap(),
            Target::CsvCollection(dir.join("customers.csv"), EntityKind::Customer)
        );
    }

    #[test]
    fn other_extensions_are_rejected() {
        let err = Target::resolve(Path::new("data.xlsx"), None).unwrap_err();
        assert!(matches!(err, InterchangeError::UnsupportedFormat(ext) if ext == "xlsx"));
    }

    #[test]
    fn completeness() {
        assert!(Target::JsonSnapshot(PathBuf::from("a.json")).is_complete());
        assert!(Target::CsvDirectory(PathBuf::from("a")).is_complete());
        assert!(!Target::CsvCollection(PathBuf::from("a.csv"), EntityKind::Order).is_complete());
    }
}
