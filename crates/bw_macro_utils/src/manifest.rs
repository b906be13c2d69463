use std::collections::BTreeMap;
use std::env;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};
use std::time::SystemTime;

use toml_edit::{Document, Item, Table};

/// The parsed `Cargo.toml` of the crate a macro is expanding in.
///
/// Generated code has to name `bw_reflect` the way the *calling* crate sees it:
/// directly as `::bw_reflect`, or through the umbrella crate as
/// `::beanwrap::reflect`.
///
/// ```rust,no_run
/// # use bw_macro_utils::Manifest;
/// let path: syn::Path = Manifest::shared(|m| m.get_crate_path("bw_reflect"));
/// ```
///
/// # Resolution rules
///
/// 1. A crate listed in `dependencies` resolves to `::crate_name`.
/// 2. A `bw_*` crate resolves to `::beanwrap::short_name` when the caller depends
///    on `beanwrap` (e.g. `bw_reflect` -> `::beanwrap::reflect`).
/// 3. Rules 1 and 2 are repeated for `dev-dependencies`.
/// 4. Anything else falls back to `::crate_name`.
///
/// A crate that expands its own derive (tests, doctests) should declare
/// `extern crate self as bw_reflect;` so the absolute path also works inside it.
#[derive(Debug)]
pub struct Manifest {
    pub manifest: Document<Box<str>>,
    pub modified_time: SystemTime,
}

const UMBRELLA_NAME: &str = "beanwrap";
const CRATE_PREFIX: &str = "bw_";

impl Manifest {
    #[inline(never)]
    fn manifest_path() -> PathBuf {
        let dir = env::var_os("CARGO_MANIFEST_DIR")
            .expect("CARGO_MANIFEST_DIR should be auto-defined by cargo.");
        let path = PathBuf::from(dir).join("Cargo.toml");
        assert!(
            path.exists(),
            "Cargo manifest does not exist at path {}",
            path.display(),
        );
        path
    }

    #[inline(never)]
    fn modified_time(path: &Path) -> Result<SystemTime, std::io::Error> {
        std::fs::metadata(path).and_then(|metadata| metadata.modified())
    }

    #[inline(never)]
    fn read(path: &Path) -> Document<Box<str>> {
        let text = std::fs::read_to_string(path)
            .unwrap_or_else(|_| panic!("Unable to read cargo manifest: {}", path.display()))
            .into_boxed_str();
        Document::parse(text)
            .unwrap_or_else(|_| panic!("Failed to parse cargo manifest: {}", path.display()))
    }

    fn absolute(segments: &[&str]) -> syn::Path {
        let text = segments.iter().fold(String::new(), |mut acc, segment| {
            acc.push_str("::");
            acc.push_str(segment);
            acc
        });
        syn::parse_str(&text).unwrap_or_else(|_| panic!("`{text}` is not a valid path"))
    }

    fn find_in(deps: &Table, name: &str) -> Option<syn::Path> {
        if deps.contains_key(name) {
            return Some(Self::absolute(&[name]));
        }
        let short = name.strip_prefix(CRATE_PREFIX)?;
        deps.contains_key(UMBRELLA_NAME)
            .then(|| Self::absolute(&[UMBRELLA_NAME, short]))
    }

    /// Returns the path under which the calling crate can reach `name`.
    #[inline(never)]
    pub fn get_crate_path(&self, name: &str) -> syn::Path {
        ["dependencies", "dev-dependencies"]
            .into_iter()
            .filter_map(|table| match self.manifest.get(table) {
                Some(Item::Table(deps)) => Self::find_in(deps, name),
                _ => None,
            })
            .next()
            .unwrap_or_else(|| Self::absolute(&[name]))
    }

    /// Runs `func` against the caller's manifest.
    ///
    /// Manifests are cached per path and reparsed only when the file's modified
    /// time changes. Call this once per macro invocation and keep the result.
    pub fn shared<R>(func: impl FnOnce(&Self) -> R) -> R {
        static MANIFESTS: RwLock<BTreeMap<PathBuf, Manifest>> = RwLock::new(BTreeMap::new());

        let path = Self::manifest_path();
        let modified_time =
            Self::modified_time(&path).expect("The Cargo.toml should have a modified time.");

        let manifests = MANIFESTS.read().unwrap_or_else(PoisonError::into_inner);
        if let Some(manifest) = manifests.get(&path)
            && manifest.modified_time == modified_time
        {
            return func(manifest);
        }
        drop(manifests);

        let manifest = Manifest {
            manifest: Self::read(&path),
            modified_time,
        };
        let result = func(&manifest);

        MANIFESTS
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(path, manifest);

        result
    }
}

#[cfg(test)]
mod tests {
    use super::Manifest;
    use std::time::SystemTime;
    use toml_edit::Document;

    fn path_string(path: &syn::Path) -> String {
        path.segments
            .iter()
            .map(|s| s.ident.to_string())
            .collect::<Vec<_>>()
            .join("::")
    }

    fn manifest(text: &str) -> Manifest {
        Manifest {
            manifest: Document::parse(text.to_owned().into_boxed_str()).unwrap(),
            modified_time: SystemTime::UNIX_EPOCH,
        }
    }

    #[test]
    fn direct_dependency_wins() {
        let m = manifest("[dependencies]\nbw_reflect = \"0.0.1\"\nbeanwrap = \"0.0.1\"\n");
        assert_eq!(path_string(&m.get_crate_path("bw_reflect")), "bw_reflect");
    }

    #[test]
    fn umbrella_dependency() {
        let m = manifest("[dependencies]\nbeanwrap = \"0.0.1\"\n");
        assert_eq!(path_string(&m.get_crate_path("bw_reflect")), "beanwrap::reflect");
    }

    #[test]
    fn dev_dependency_and_fallback() {
        let m = manifest("[dev-dependencies]\nbeanwrap = \"0.0.1\"\n");
        assert_eq!(path_string(&m.get_crate_path("bw_beans")), "beanwrap::beans");
        assert_eq!(path_string(&m.get_crate_path("serde")), "serde");
    }
}
