use uuid::Uuid;

/// Generate a collection-scoped document ID, e.g. `offer::<uuid>`.
pub fn new_id(prefix: &str) -> String {
    format!("{prefix}::{}", Uuid::new_v4())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_prefixed_and_unique() {
        let first = new_id("offer");
        let second = new_id("offer");
        assert!(first.starts_with("offer::"));
        assert_ne!(first, second);
    }
}
