use crate::model::Member;

/// Members whose name, email or phone contains `query`, ignoring case.
///
/// A blank query matches everyone. Order is kept.
pub fn search_members<'a>(members: &'a [Member], query: &str) -> Vec<&'a Member> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return members.iter().collect();
    }

    members
        .iter()
        .filter(|m| {
            m.name.to_lowercase().contains(&needle)
                || m.phone.to_lowercase().contains(&needle)
                || m
                    .email
                    .as_deref()
                    .is_some_and(|e| e.to_lowercase().contains(&needle))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::test_support::member_ending;

    fn roster() -> Vec<Member> {
        let mut a = member_ending(1, "Meera Nair", None);
        a.email = Some("Meera@Example.com".into());
        let mut b = member_ending(2, "Kiran", None);
        b.phone = "98450 12345".into();
        vec![a, b, member_ending(3, "Arjun", None)]
    }

    fn ids(found: &[&Member]) -> Vec<String> {
        found.iter().map(|m| m.id.to_string()).collect()
    }

    #[test]
    fn matches_any_field_case_insensitively() {
        let members = roster();
        assert_eq!(ids(&search_members(&members, "meera")), ["1"]);
        assert_eq!(ids(&search_members(&members, "EXAMPLE.COM")), ["1"]);
        assert_eq!(ids(&search_members(&members, "12345")), ["2"]);
        assert_eq!(ids(&search_members(&members, "ar")), ["1", "3"]);
    }

    #[test]
    fn blank_query_returns_everyone() {
        let members = roster();
        assert_eq!(search_members(&members, "  ").len(), 3);
    }

    #[test]
    fn no_match() {
        assert!(search_members(&roster(), "zzz").is_empty());
    }
}
