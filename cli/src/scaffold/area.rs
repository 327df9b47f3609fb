//! Configuration areas.
//!
//! An area selects which variant of a configuration file a fragment is merged
//! into: `etc/di.xml` for the global area, `etc/frontend/di.xml` for the
//! storefront, and so on. Layout handles use the same names below `view/`,
//! where `base` is also allowed.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Area {
    Global,
    Frontend,
    Adminhtml,
    WebapiRest,
    WebapiSoap,
    Graphql,
    Crontab,
    Base,
}

impl Area {
    pub const ALL: [Area; 8] = [
        Area::Global,
        Area::Frontend,
        Area::Adminhtml,
        Area::WebapiRest,
        Area::WebapiSoap,
        Area::Graphql,
        Area::Crontab,
        Area::Base,
    ];

    /// Areas a configuration file under `etc/` may be scoped to.
    pub const CONFIG: [Area; 7] = [
        Area::Global,
        Area::Frontend,
        Area::Adminhtml,
        Area::WebapiRest,
        Area::WebapiSoap,
        Area::Graphql,
        Area::Crontab,
    ];

    /// Directory below `etc/` (or `view/`). Empty for the global area.
    pub fn dir_name(self) -> &'static str {
        match self {
            Area::Global => "",
            Area::Frontend => "frontend",
            Area::Adminhtml => "adminhtml",
            Area::WebapiRest => "webapi_rest",
            Area::WebapiSoap => "webapi_soap",
            Area::Graphql => "graphql",
            Area::Crontab => "crontab",
            Area::Base => "base",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Area::Global => "global",
            other => other.dir_name(),
        }
    }

    /// Parses an area name as typed on the command line. An empty string is the global area.
    pub fn parse(value: &str) -> Option<Area> {
        let value = value.trim();
        if value.is_empty() {
            return Some(Area::Global);
        }
        Area::ALL
            .into_iter()
            .find(|area| area.name().eq_ignore_ascii_case(value))
    }

    /// Maps a directory name found below `etc/` back to its area.
    pub fn from_dir_name(dir: &str) -> Option<Area> {
        Area::CONFIG
            .into_iter()
            .find(|area| !area.dir_name().is_empty() && area.dir_name() == dir)
    }
}

impl fmt::Display for Area {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
