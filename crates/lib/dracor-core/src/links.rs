//! Construction of frontend, external-tool and download links for a play.
//!
//! The DraCor frontend offers a tools tab that forwards play data to the
//! CLARIN Language Resource Switchboard, Voyant Tools and Gephi Lite. Those
//! targets take the play's API URL as a query value, so it is
//! percent-encoded here; the request builder itself never encodes.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::Serialize;

use crate::client::build_url;

// Everything except RFC 3986 unreserved characters, matching what the
// frontend itself sends to the external tools.
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Links into the DraCor frontend tabs for one play.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrontendLinks {
    pub network_tab: String,
    pub speech_distribution_tab: String,
    pub fulltext_tab: String,
    pub downloads_tab: String,
    pub tools_tab: String,
}

/// Links handing play data to an external tool, one per text flavor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolLinks {
    pub tei: String,
    pub plaintext: String,
    pub spoken_text: String,
    pub stage_directions: String,
}

/// Direct download links for network and relation data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DownloadLinks {
    pub network_gexf: String,
    pub network_graphml: String,
    pub relations_gexf: String,
    pub relations_graphml: String,
}

/// All link targets for one play.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayLinks {
    pub frontend: FrontendLinks,
    pub clarin_switchboard: ToolLinks,
    pub voyant_tools: ToolLinks,
    pub gephi_lite: String,
    pub downloads: DownloadLinks,
}

/// Builds the full link set for a play.
#[must_use]
pub fn play_links(frontend_base: &str, api_base: &str, corpus_name: &str, play_name: &str) -> PlayLinks {
    let play_url = build_url(api_base, Some(corpus_name), Some(play_name), None);
    // Trailing slash so that tool suffixes (tei, txt, ...) append cleanly.
    let quoted_play_url = utf8_percent_encode(&format!("{play_url}/"), QUERY_VALUE).to_string();

    let frontend = FrontendLinks {
        network_tab: format!("{frontend_base}/{corpus_name}/{play_name}"),
        speech_distribution_tab: format!("{frontend_base}/{corpus_name}/{play_name}#speech"),
        fulltext_tab: format!("{frontend_base}/{corpus_name}/{play_name}#text"),
        downloads_tab: format!("{frontend_base}/{corpus_name}/{play_name}#downloads"),
        tools_tab: format!("{frontend_base}/{corpus_name}/{play_name}#tools"),
    };

    let clarin_switchboard = ToolLinks {
        tei: format!("https://switchboard.clarin.eu/#/vlo/{quoted_play_url}tei"),
        plaintext: format!("https://switchboard.clarin.eu/#/vlo/{quoted_play_url}txt"),
        spoken_text: format!("https://switchboard.clarin.eu/#/vlo/{quoted_play_url}spoken-text"),
        stage_directions: format!("https://switchboard.clarin.eu/#/vlo/{quoted_play_url}stage-directions"),
    };

    let voyant_tools = ToolLinks {
        tei: format!("https://voyant-tools.org/?input={quoted_play_url}tei"),
        plaintext: format!("https://voyant-tools.org/?input={quoted_play_url}txt"),
        spoken_text: format!("https://voyant-tools.org/?input={quoted_play_url}spoken-text"),
        stage_directions: format!("https://voyant-tools.org/?input={quoted_play_url}stage-directions"),
    };

    let gexf_url = build_url(api_base, Some(corpus_name), Some(play_name), Some("networkdata/gexf"));
    let quoted_gexf_url = utf8_percent_encode(&gexf_url, QUERY_VALUE).to_string();

    let downloads = DownloadLinks {
        network_gexf: gexf_url.clone(),
        network_graphml: build_url(api_base, Some(corpus_name), Some(play_name), Some("networkdata/graphml")),
        relations_gexf: build_url(api_base, Some(corpus_name), Some(play_name), Some("relations/gexf")),
        relations_graphml: build_url(api_base, Some(corpus_name), Some(play_name), Some("relations/graphml")),
    };

    PlayLinks {
        frontend,
        clarin_switchboard,
        voyant_tools,
        gephi_lite: format!("https://gephi.org/gephi-lite/?file={quoted_gexf_url}"),
        downloads,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn play_url_is_fully_percent_encoded() {
        let links = play_links(
            "https://staging.dracor.org",
            "https://staging.dracor.org/api/v1",
            "ger",
            "lessing-emilia-galotti",
        );
        assert_eq!(
            links.voyant_tools.tei,
            "https://voyant-tools.org/?input=https%3A%2F%2Fstaging.dracor.org%2Fapi%2Fv1%2Fcorpora%2Fger%2Fplays%2Flessing-emilia-galotti%2Ftei"
        );
        assert!(links.clarin_switchboard.spoken_text.ends_with("%2Fspoken-text"));
    }

    #[test]
    fn frontend_and_download_links_are_plain() {
        let links = play_links(
            "https://staging.dracor.org",
            "https://staging.dracor.org/api/v1",
            "ger",
            "gogol-revizor",
        );
        assert_eq!(links.frontend.network_tab, "https://staging.dracor.org/ger/gogol-revizor");
        assert_eq!(links.frontend.tools_tab, "https://staging.dracor.org/ger/gogol-revizor#tools");
        assert_eq!(
            links.downloads.relations_graphml,
            "https://staging.dracor.org/api/v1/corpora/ger/plays/gogol-revizor/relations/graphml"
        );
        assert!(links.gephi_lite.starts_with("https://gephi.org/gephi-lite/?file="));
        assert!(links.gephi_lite.ends_with("%2Fnetworkdata%2Fgexf"));
        let value = links
            .gephi_lite
            .strip_prefix("https://gephi.org/gephi-lite/?file=")
            .unwrap();
        assert!(!value.contains('/'), "query value must be fully encoded");
    }
}
