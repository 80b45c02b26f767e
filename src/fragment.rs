//! The closed set of bundle fragments and the layered lookup that picks a
//! source file for each one.

use std::fmt;
use std::path::{Path, PathBuf};

/// Subdirectory of a template that may also hold overrides.
pub const OVERRIDE_SUBDIR: &str = "fragments";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Fragment {
    InfoPlist,
    Title,
    Header,
    Footer,
    Document,
}

impl Fragment {
    pub const ALL: [Fragment; 5] = [
        Fragment::InfoPlist,
        Fragment::Title,
        Fragment::Header,
        Fragment::Footer,
        Fragment::Document,
    ];

    pub fn file_name(self) -> &'static str {
        match self {
            Fragment::InfoPlist => "Info.plist",
            Fragment::Title => "title.html",
            Fragment::Header => "header.html",
            Fragment::Footer => "footer.html",
            Fragment::Document => "document.html",
        }
    }

    pub fn from_file_name(name: &str) -> Option<Fragment> {
        Fragment::ALL.into_iter().find(|f| f.file_name() == name)
    }

    /// Location inside the bundle directory.
    pub fn destination(self) -> PathBuf {
        match self {
            Fragment::InfoPlist => Path::new("Contents").join(self.file_name()),
            _ => Path::new("Contents")
                .join("Resources")
                .join(self.file_name()),
        }
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// `<template>/<name>`
    Override,
    /// `<template>/fragments/<name>`
    OverrideSubdir,
    /// `<base>/<name>`
    Base,
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Origin::Override => "override",
            Origin::OverrideSubdir => "override (fragments/)",
            Origin::Base => "base",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FragmentSource {
    pub path: PathBuf,
    pub origin: Origin,
}

/// The two directory layers a fragment can come from.
#[derive(Debug, Clone, Copy)]
pub struct Layers<'a> {
    pub base_dir: &'a Path,
    pub template_dir: &'a Path,
}

impl Layers<'_> {
    /// First existing file wins: template root, template `fragments/`, then base.
    pub fn resolve(&self, fragment: Fragment) -> Option<FragmentSource> {
        let name = fragment.file_name();
        [
            (self.template_dir.join(name), Origin::Override),
            (
                self.template_dir.join(OVERRIDE_SUBDIR).join(name),
                Origin::OverrideSubdir,
            ),
            (self.base_dir.join(name), Origin::Base),
        ]
        .into_iter()
        .find(|(path, _)| path.is_file())
        .map(|(path, origin)| FragmentSource { path, origin })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    struct Dirs {
        _root: tempfile::TempDir,
        base: PathBuf,
        template: PathBuf,
    }

    fn dirs() -> Dirs {
        let root = tempfile::tempdir().unwrap();
        let base = root.path().join("base");
        let template = root.path().join("demo");
        fs::create_dir_all(&base).unwrap();
        fs::create_dir_all(template.join(OVERRIDE_SUBDIR)).unwrap();
        Dirs {
            _root: root,
            base,
            template,
        }
    }

    #[test]
    fn override_beats_base() {
        let d = dirs();
        fs::write(d.base.join("header.html"), "base").unwrap();
        fs::write(d.template.join("header.html"), "override").unwrap();

        let layers = Layers {
            base_dir: &d.base,
            template_dir: &d.template,
        };
        let source = layers.resolve(Fragment::Header).unwrap();
        assert_eq!(source.origin, Origin::Override);
        assert_eq!(source.path, d.template.join("header.html"));
    }

    #[test]
    fn override_subdir_beats_base() {
        let d = dirs();
        fs::write(d.base.join("footer.html"), "base").unwrap();
        fs::write(d.template.join(OVERRIDE_SUBDIR).join("footer.html"), "sub").unwrap();

        let layers = Layers {
            base_dir: &d.base,
            template_dir: &d.template,
        };
        assert_eq!(
            layers.resolve(Fragment::Footer).unwrap().origin,
            Origin::OverrideSubdir
        );
    }

    #[test]
    fn falls_back_to_base() {
        let d = dirs();
        fs::write(d.base.join("Info.plist"), "<plist/>").unwrap();

        let layers = Layers {
            base_dir: &d.base,
            template_dir: &d.template,
        };
        let source = layers.resolve(Fragment::InfoPlist).unwrap();
        assert_eq!(source.origin, Origin::Base);
        assert_eq!(source.path, d.base.join("Info.plist"));
    }

    #[test]
    fn missing_everywhere() {
        let d = dirs();
        let layers = Layers {
            base_dir: &d.base,
            template_dir: &d.template,
        };
        assert!(layers.resolve(Fragment::Document).is_none());
    }

    #[test]
    fn destinations() {
        assert_eq!(
            Fragment::InfoPlist.destination(),
            PathBuf::from("Contents/Info.plist")
        );
        assert_eq!(
            Fragment::Document.destination(),
            PathBuf::from("Contents/Resources/document.html")
        );
    }

    #[test]
    fn from_file_name_round_trips_known_names() {
        for fragment in Fragment::ALL {
            assert_eq!(Fragment::from_file_name(fragment.file_name()), Some(fragment));
        }
        assert_eq!(Fragment::from_file_name("style.css"), None);
    }
}
