//! Average rating derivation.

use crate::entities::Review;

/// Floor of the mean review rating, or `None` when there are no reviews.
///
/// A location with no reviews keeps whatever rating it last had.
pub fn average_rating(reviews: &[Review]) -> Option<i32> {
    if reviews.is_empty() {
        return None;
    }

    let total: i64 = reviews.iter().map(|r| i64::from(r.rating)).sum();
    let count = reviews.len() as i64;
    i32::try_from(total.div_euclid(count)).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn review(rating: i32) -> Review {
        Review::new("Simon", rating, "Lovely coffee", Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap())
    }

    #[test]
    fn empty_reviews_have_no_average() {
        assert_eq!(average_rating(&[]), None);
    }

    #[test]
    fn floors_the_mean() {
        let reviews = vec![review(5), review(4), review(4)];
        // 13 / 3 = 4.33
        assert_eq!(average_rating(&reviews), Some(4));

        let reviews = vec![review(1), review(2)];
        assert_eq!(average_rating(&reviews), Some(1));
    }

    #[test]
    fn single_review_is_its_own_average() {
        assert_eq!(average_rating(&[review(3)]), Some(3));
    }

    #[test]
    fn floors_towards_negative_infinity() {
        let reviews = vec![review(-1), review(0)];
        assert_eq!(average_rating(&reviews), Some(-1));
    }
}
