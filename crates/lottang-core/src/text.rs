//! Text normalization shared by the parser and the match/score pipeline.

/// Collapse all whitespace runs to single spaces and trim the ends.
#[must_use]
pub fn normalize_ws(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Build the join key used to match winner rows against the store directory.
///
/// Whitespace, interpuncts, and dashes vary freely between the two sources,
/// so they are stripped before joining name and address with `|`.
#[must_use]
pub fn match_key(name: &str, addr: &str) -> String {
    format!("{}|{}", squeeze(name), squeeze(addr))
}

fn squeeze(s: &str) -> String {
    s.chars()
        .filter(|c| !c.is_whitespace() && *c != '·' && *c != '-')
        .collect()
}

/// Split a full address into its first three tokens (sido, sigungu, dong).
///
/// Addresses with fewer than three tokens yield all-empty parts rather than a
/// partial split, matching how downstream filters treat them.
#[must_use]
pub fn split_address(addr: &str) -> (String, String, String) {
    let mut parts = addr.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(sido), Some(sigungu), Some(dong)) => {
            (sido.to_string(), sigungu.to_string(), dong.to_string())
        }
        _ => (String::new(), String::new(), String::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_ws_collapses_runs() {
        assert_eq!(normalize_ws("  복권   나라\t\n강남점  "), "복권 나라 강남점");
    }

    #[test]
    fn normalize_ws_empty() {
        assert_eq!(normalize_ws("   "), "");
    }

    #[test]
    fn match_key_strips_separators() {
        assert_eq!(
            match_key("복권 나라", "서울 강남구 테헤란로 12-3"),
            "복권나라|서울강남구테헤란로123"
        );
    }

    #[test]
    fn match_key_strips_interpunct() {
        assert_eq!(match_key("세븐·일레븐", "부산 진구"), "세븐일레븐|부산진구");
    }

    #[test]
    fn split_address_three_tokens() {
        let (sido, sigungu, dong) = split_address("서울 강남구 역삼동 123-4");
        assert_eq!(sido, "서울");
        assert_eq!(sigungu, "강남구");
        assert_eq!(dong, "역삼동");
    }

    #[test]
    fn split_address_too_short_yields_empty() {
        let (sido, sigungu, dong) = split_address("서울 강남구");
        assert!(sido.is_empty() && sigungu.is_empty() && dong.is_empty());
    }
}
