//! Like aggregation for the "top voted" section and the admin overview.
//!
//! Counts are always derived from the raw like rows of the current fetch;
//! nothing here is stored.

use contest_backend::{LikeRecord, PhotoRecord};
use std::collections::{HashMap, HashSet};

/// A photo together with its like count
#[derive(Debug, Clone, PartialEq)]
pub struct RankedPhoto {
    pub photo: PhotoRecord,
    pub likes: u32,
}

/// Photos tied for the most likes
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Leaderboard {
    pub max_likes: u32,
    pub leaders: Vec<RankedPhoto>,
}

impl Leaderboard {
    /// No winner is declared while nobody has liked anything
    pub fn is_empty(&self) -> bool {
        self.leaders.is_empty()
    }
}

/// Number of likes per photo id; ids without likes are absent
pub fn count_likes(likes: &[LikeRecord]) -> HashMap<String, u32> {
    let mut counts: HashMap<String, u32> = HashMap::new();
    for like in likes {
        *counts.entry(like.photo_id.clone()).or_insert(0) += 1;
    }
    counts
}

fn count_of(counts: &HashMap<String, u32>, photo_id: &str) -> u32 {
    counts.get(photo_id).copied().unwrap_or(0)
}

/// Every photo whose like count equals the maximum, in photo order.
///
/// Likes that reference photos outside `photos` are ignored.
pub fn find_leaders(photos: &[PhotoRecord], likes: &[LikeRecord]) -> Leaderboard {
    let counts = count_likes(likes);

    let max_likes = photos
        .iter()
        .map(|p| count_of(&counts, &p.id))
        .max()
        .unwrap_or(0);

    if max_likes == 0 {
        return Leaderboard::default();
    }

    let leaders = photos
        .iter()
        .filter(|p| count_of(&counts, &p.id) == max_likes)
        .map(|p| RankedPhoto {
            photo: p.clone(),
            likes: max_likes,
        })
        .collect();

    Leaderboard { max_likes, leaders }
}

/// The `n` most liked photos, most liked first; ties keep photo order
pub fn top_liked(photos: &[PhotoRecord], likes: &[LikeRecord], n: usize) -> Vec<RankedPhoto> {
    let counts = count_likes(likes);
    let mut ranked: Vec<RankedPhoto> = photos
        .iter()
        .map(|p| RankedPhoto {
            photo: p.clone(),
            likes: count_of(&counts, &p.id),
        })
        .collect();

    ranked.sort_by(|a, b| b.likes.cmp(&a.likes));
    ranked.truncate(n);
    ranked
}

/// Likes that belong to one of `photos`
pub fn total_likes(photos: &[PhotoRecord], likes: &[LikeRecord]) -> usize {
    let ids: HashSet<&str> = photos.iter().map(|p| p.id.as_str()).collect();
    likes.iter().filter(|l| ids.contains(l.photo_id.as_str())).count()
}

/// Number of different categories used by `photos`
pub fn distinct_categories(photos: &[PhotoRecord]) -> usize {
    photos
        .iter()
        .map(|p| p.category.as_str())
        .collect::<HashSet<_>>()
        .len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use contest_backend::PhotoStatus;

    fn photo(id: &str, category: &str) -> PhotoRecord {
        PhotoRecord {
            id: id.to_string(),
            url: format!("https://img.example/{}.jpg", id),
            title: format!("Photo {}", id),
            category: category.to_string(),
            photographer_id: "p1".to_string(),
            status: PhotoStatus::Approved,
            created_at: None,
        }
    }

    fn like(photo_id: &str, user_id: &str) -> LikeRecord {
        LikeRecord {
            photo_id: photo_id.to_string(),
            user_id: user_id.to_string(),
        }
    }

    fn leader_ids(board: &Leaderboard) -> Vec<&str> {
        board.leaders.iter().map(|l| l.photo.id.as_str()).collect()
    }

    #[test]
    fn test_single_leader() {
        let photos = vec![photo("a", "Portrait"), photo("b", "Street")];
        let likes = vec![like("a", "u1"), like("a", "u2"), like("b", "u1")];

        let counts = count_likes(&likes);
        assert_eq!(counts.get("a"), Some(&2));
        assert_eq!(counts.get("b"), Some(&1));

        let board = find_leaders(&photos, &likes);
        assert_eq!(leader_ids(&board), vec!["a"]);
        assert_eq!(board.max_likes, 2);
        assert_eq!(board.leaders[0].likes, 2);
    }

    #[test]
    fn test_ties_are_all_leaders() {
        let photos = vec![photo("a", "Portrait"), photo("b", "Street")];
        let likes = vec![like("a", "u1"), like("b", "u1")];

        let board = find_leaders(&photos, &likes);
        assert_eq!(leader_ids(&board), vec!["a", "b"]);
        assert!(board.leaders.iter().all(|l| l.likes == 1));
    }

    #[test]
    fn test_no_likes_no_leaders() {
        let board = find_leaders(&[photo("a", "Portrait")], &[]);
        assert!(board.is_empty());
        assert_eq!(board.max_likes, 0);

        assert!(find_leaders(&[], &[like("a", "u1")]).is_empty());
    }

    #[test]
    fn test_orphaned_likes_are_ignored() {
        let photos = vec![photo("a", "Portrait")];
        let likes = vec![like("a", "u1"), like("gone", "u1"), like("gone", "u2")];

        let board = find_leaders(&photos, &likes);
        assert_eq!(leader_ids(&board), vec!["a"]);
        assert_eq!(board.max_likes, 1);
        assert_eq!(total_likes(&photos, &likes), 1);
    }

    #[test]
    fn test_like_order_does_not_matter() {
        let photos = vec![photo("a", "Portrait"), photo("b", "Street"), photo("c", "Street")];
        let mut likes = vec![
            like("c", "u1"),
            like("a", "u1"),
            like("c", "u2"),
            like("b", "u3"),
            like("a", "u2"),
        ];
        let first = find_leaders(&photos, &likes);
        likes.reverse();
        let second = find_leaders(&photos, &likes);

        assert_eq!(first, second);
        assert_eq!(leader_ids(&first), vec!["a", "c"]);
    }

    #[test]
    fn test_top_liked() {
        let photos = vec![
            photo("a", "Portrait"),
            photo("b", "Street"),
            photo("c", "Street"),
            photo("d", "Landscape"),
            photo("e", "Landscape"),
        ];
        let likes = vec![
            like("c", "u1"),
            like("c", "u2"),
            like("c", "u3"),
            like("b", "u1"),
            like("d", "u1"),
            like("e", "u1"),
            like("e", "u2"),
        ];

        let top = top_liked(&photos, &likes, 4);
        let ids: Vec<&str> = top.iter().map(|r| r.photo.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "e", "b", "d"]);
        assert_eq!(top[0].likes, 3);

        assert_eq!(top_liked(&photos, &likes, 0), vec![]);
        assert_eq!(top_liked(&photos[..1], &likes, 4)[0].likes, 0);
    }

    #[test]
    fn test_distinct_categories() {
        let photos = vec![photo("a", "Portrait"), photo("b", "Street"), photo("c", "Street")];
        assert_eq!(distinct_categories(&photos), 2);
        assert_eq!(distinct_categories(&[]), 0);
    }
}
