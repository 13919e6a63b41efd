pub mod booking_rules;
pub mod booking_service;
pub mod error;
pub mod item_service;
pub mod request_service;
pub mod user_service;

use chrono::NaiveDateTime;
use std::{collections::HashMap, hash::Hash};

/// Wall-clock "now" in local time, the reference point for every temporal rule.
pub fn now() -> NaiveDateTime {
    chrono::Local::now().naive_local()
}

/// Bucket rows by a key, keeping their original order inside each bucket.
pub fn group_by<T, K>(rows: Vec<T>, key: impl Fn(&T) -> K) -> HashMap<K, Vec<T>>
where
    K: Eq + Hash,
{
    let mut groups: HashMap<K, Vec<T>> = HashMap::new();
    for row in rows {
        groups.entry(key(&row)).or_default().push(row);
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::group_by;

    #[test]
    fn group_by_keeps_order_within_groups() {
        let groups = group_by(vec![(1, "a"), (2, "b"), (1, "c")], |(k, _)| *k);

        assert_eq!(groups[&1], vec![(1, "a"), (1, "c")]);
        assert_eq!(groups[&2], vec![(2, "b")]);
        assert!(!groups.contains_key(&3));
    }
}
