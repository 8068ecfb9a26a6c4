//! Markdown footer links for comments posted by a GitHub App.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Local, NaiveDate};

use crate::error::Error;

/// Where the app's listing lives.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FooterKind {
    #[default]
    Marketplace,
    App,
}

impl FooterKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Marketplace => "marketplace",
            Self::App => "app",
        }
    }
}

impl fmt::Display for FooterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FooterKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "marketplace" => Ok(Self::Marketplace),
            "app" => Ok(Self::App),
            other => Err(Error::UnknownFooterKind(other.to_string())),
        }
    }
}

struct Emoji {
    docs: &'static str,
    repo: &'static str,
    issues: &'static str,
    marketplace: &'static str,
}

const FESTIVE: Emoji = Emoji {
    docs: "🎄",
    repo: "☃",
    issues: "🎅",
    marketplace: "🎁",
};

const EVERYDAY: Emoji = Emoji {
    docs: "📝",
    repo: ":octocat:",
    issues: "🙋",
    marketplace: "🏪",
};

/// December through Twelfth Night.
fn is_festive(date: NaiveDate) -> bool {
    date.month() == 12 || (date.month() == 1 && date.day() <= 6)
}

/// Build the ` | `-separated footer for the app published from `owner/name`.
///
/// `event_date` picks the emoji and defaults to today. The docs link is
/// only included when `docs_url` is given.
#[must_use]
pub fn make_footer_links(
    owner: &str,
    name: &str,
    event_date: Option<NaiveDate>,
    kind: FooterKind,
    docs_url: Option<&str>,
) -> String {
    let date = event_date.unwrap_or_else(|| Local::now().date_naive());
    let emoji = if is_festive(date) { &FESTIVE } else { &EVERYDAY };

    let mut links = Vec::with_capacity(4);
    if let Some(docs_url) = docs_url.filter(|url| !url.is_empty()) {
        links.push(format!("[{} docs]({docs_url})", emoji.docs));
    }

    links.push(format!("[{} repo](https://github.com/{owner}/{name})", emoji.repo));
    links.push(format!(
        "[{} issues](https://github.com/{owner}/{name}/issues)",
        emoji.issues
    ));
    links.push(format!(
        "[{} marketplace](https://github.com/{kind}/{name})",
        emoji.marketplace
    ));

    links.join(" | ")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    #[test]
    fn test_everyday_marketplace() {
        let footer = make_footer_links(
            "repo-helper",
            "repo-helper-bot",
            date(2021, 3, 14),
            FooterKind::Marketplace,
            None,
        );

        assert_eq!(
            footer,
            "[:octocat: repo](https://github.com/repo-helper/repo-helper-bot) | \
             [🙋 issues](https://github.com/repo-helper/repo-helper-bot/issues) | \
             [🏪 marketplace](https://github.com/marketplace/repo-helper-bot)"
        );
    }

    #[test]
    fn test_festive_app_with_docs() {
        let footer = make_footer_links(
            "octo",
            "octo-bot",
            date(2020, 12, 25),
            FooterKind::App,
            Some("https://octo-bot.readthedocs.io"),
        );

        assert_eq!(
            footer,
            "[🎄 docs](https://octo-bot.readthedocs.io) | \
             [☃ repo](https://github.com/octo/octo-bot) | \
             [🎅 issues](https://github.com/octo/octo-bot/issues) | \
             [🎁 marketplace](https://github.com/app/octo-bot)"
        );
    }

    #[test]
    fn test_festive_season_boundaries() {
        assert!(is_festive(date(2020, 12, 1).unwrap()));
        assert!(is_festive(date(2021, 1, 6).unwrap()));
        assert!(!is_festive(date(2021, 1, 7).unwrap()));
        assert!(!is_festive(date(2020, 11, 30).unwrap()));
    }

    #[test]
    fn test_empty_docs_url_is_omitted() {
        let footer = make_footer_links("o", "n", date(2021, 6, 1), FooterKind::App, Some(""));

        assert!(!footer.contains("docs"));
        assert_eq!(footer.matches(" | ").count(), 2);
    }

    #[test]
    fn test_footer_kind_parse() {
        assert_eq!("app".parse::<FooterKind>().unwrap(), FooterKind::App);
        assert_eq!(
            "marketplace".parse::<FooterKind>().unwrap(),
            FooterKind::Marketplace
        );
        assert!(matches!(
            "store".parse::<FooterKind>(),
            Err(Error::UnknownFooterKind(_))
        ));
    }
}
