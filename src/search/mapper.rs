use super::client::{SearchItem, SearchResponse};
use crate::scout::types::{Resource, ResourceType};

pub const BASE_SCORE: f64 = 1.0;

/// Score drop per rank position within a result category.
const RANK_PENALTY: f64 = 0.05;

/// Normalize a raw search reply into resources: organic entries become
/// articles, video entries become videos, in concatenation order. Each
/// category restarts its rank at `base_score`.
pub fn map_to_resources(data: &SearchResponse, base_score: f64) -> Vec<Resource> {
    let mut resources = Vec::with_capacity(data.organic.len() + data.videos.len());

    for (rank, item) in data.organic.iter().enumerate() {
        resources.push(to_resource(item, ResourceType::Article, base_score, rank));
    }
    for (rank, item) in data.videos.iter().enumerate() {
        resources.push(to_resource(item, ResourceType::Video, base_score, rank));
    }

    resources
}

fn to_resource(item: &SearchItem, kind: ResourceType, base_score: f64, rank: usize) -> Resource {
    Resource {
        title: item.title.clone().unwrap_or_default(),
        url: item.link.clone().unwrap_or_default(),
        kind,
        source: item.source.clone().unwrap_or_else(|| "web".to_string()),
        language: None,
        estimated_level: None,
        short_summary: None,
        score: base_score - rank as f64 * RANK_PENALTY,
        raw_text: None,
        content_type: None,
    }
}

/// Just the result URLs, organic then video, skipping entries without a link.
pub fn result_urls(data: &SearchResponse) -> Vec<String> {
    data.organic
        .iter()
        .chain(data.videos.iter())
        .filter_map(|item| item.link.clone())
        .filter(|link| !link.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(title: &str, link: &str, source: Option<&str>) -> SearchItem {
        SearchItem {
            title: Some(title.to_string()),
            link: Some(link.to_string()),
            source: source.map(String::from),
        }
    }

    fn sample_response() -> SearchResponse {
        SearchResponse {
            organic: vec![
                item("Article A", "https://a.com", Some("SiteA")),
                item("Article B", "https://b.com", None),
            ],
            videos: vec![item("Video A", "https://v.com", Some("YouTube"))],
        }
    }

    #[test]
    fn maps_organic_and_videos_in_order() {
        let resources = map_to_resources(&sample_response(), BASE_SCORE);

        assert_eq!(resources.len(), 3);
        assert_eq!(resources[0].title, "Article A");
        assert_eq!(resources[0].url, "https://a.com");
        assert_eq!(resources[0].source, "SiteA");
        assert_eq!(resources[0].kind, ResourceType::Article);
        assert_eq!(resources[1].title, "Article B");
        assert_eq!(resources[2].kind, ResourceType::Video);
    }

    #[test]
    fn source_defaults_to_web_when_absent() {
        let resources = map_to_resources(&sample_response(), BASE_SCORE);
        assert_eq!(resources[1].source, "web");
    }

    #[test]
    fn scores_decrease_per_rank_within_each_category() {
        let data = SearchResponse {
            organic: vec![
                item("A", "https://a.com", None),
                item("B", "https://b.com", None),
                item("C", "https://c.com", None),
            ],
            videos: vec![
                item("V1", "https://v1.com", None),
                item("V2", "https://v2.com", None),
            ],
        };

        let resources = map_to_resources(&data, 1.0);

        assert_eq!(resources[0].score, 1.0);
        assert_eq!(resources[1].score, 0.95);
        assert_eq!(resources[2].score, 0.9);
        // video track restarts at the base score
        assert_eq!(resources[3].score, 1.0);
        assert_eq!(resources[4].score, 0.95);
    }

    #[test]
    fn missing_title_and_link_map_to_empty_strings() {
        let data = SearchResponse {
            organic: vec![SearchItem::default()],
            videos: vec![],
        };

        let resources = map_to_resources(&data, BASE_SCORE);
        assert_eq!(resources[0].title, "");
        assert_eq!(resources[0].url, "");
    }

    #[test]
    fn mapping_is_idempotent() {
        let data = sample_response();
        assert_eq!(
            map_to_resources(&data, BASE_SCORE),
            map_to_resources(&data, BASE_SCORE)
        );
    }

    #[test]
    fn empty_response_maps_to_empty_list() {
        assert!(map_to_resources(&SearchResponse::default(), BASE_SCORE).is_empty());
    }

    #[test]
    fn result_urls_skips_missing_and_empty_links() {
        let data = SearchResponse {
            organic: vec![
                item("A", "https://a.com", None),
                SearchItem {
                    title: Some("no link".into()),
                    link: None,
                    source: None,
                },
                item("Empty", "", None),
            ],
            videos: vec![item("V", "https://v.com", None)],
        };

        assert_eq!(result_urls(&data), vec!["https://a.com", "https://v.com"]);
    }
}
