//! Popup link construction.

use serde::Serialize;
use url::Url;

use crate::config::UrlConfig;
use crate::models::RawRecord;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DisplayUrls {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub article_url: Option<String>,
}

/// Thumbnail and article links for a record; each is absent when any field
/// it needs is missing.
pub fn derive_display_urls(record: &RawRecord, urls: &UrlConfig) -> DisplayUrls {
    DisplayUrls {
        image_url: image_url(record, &urls.image_base).map(String::from),
        article_url: article_url(record, &urls.article_base).map(String::from),
    }
}

/// `{base}/{id}/av_thumb__{img}?h={hash}`
///
/// `img` may carry subdirectories (`2019/casa.jpg`); each `/` stays a path
/// separator rather than being escaped into the file name.
fn image_url(record: &RawRecord, base: &Url) -> Option<Url> {
    let id = record.id.as_ref()?.to_string();
    let img = record.img.as_deref()?;
    let hash = record.hash.as_deref()?;

    let mut url = base.clone();
    {
        let mut segments = url.path_segments_mut().ok()?;
        segments
            .pop_if_empty()
            .push(&id)
            .extend(format!("av_thumb__{}", img).split('/'));
    }
    url.query_pairs_mut().append_pair("h", hash);
    Some(url)
}

/// `{base}/{slug}`
fn article_url(record: &RawRecord, base: &Url) -> Option<Url> {
    let slug = record.slug.as_deref()?;

    let mut url = base.clone();
    url.path_segments_mut().ok()?.pop_if_empty().push(slug);
    Some(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RecordId;

    fn full_record() -> RawRecord {
        RawRecord {
            id: Some(RecordId::Int(1234)),
            img: Some("casa.jpg".to_string()),
            hash: Some("9f2c".to_string()),
            slug: Some("casa-en-la-playa".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_both_urls() {
        let urls = derive_display_urls(&full_record(), &UrlConfig::default());
        assert_eq!(
            urls.image_url.as_deref(),
            Some("https://arquitecturaviva.com/assets/uploads/obras/1234/av_thumb__casa.jpg?h=9f2c")
        );
        assert_eq!(
            urls.article_url.as_deref(),
            Some("https://arquitecturaviva.com/obras/casa-en-la-playa")
        );
    }

    #[test]
    fn test_img_subdirectory_kept_as_path() {
        let record = RawRecord {
            img: Some("2019/casa.jpg".to_string()),
            ..full_record()
        };
        let urls = derive_display_urls(&record, &UrlConfig::default());
        assert_eq!(
            urls.image_url.as_deref(),
            Some("https://arquitecturaviva.com/assets/uploads/obras/1234/av_thumb__2019/casa.jpg?h=9f2c")
        );
    }

    #[test]
    fn test_missing_hash_drops_image() {
        let record = RawRecord {
            hash: None,
            ..full_record()
        };
        let urls = derive_display_urls(&record, &UrlConfig::default());
        assert_eq!(urls.image_url, None);
        assert!(urls.article_url.is_some());
    }

    #[test]
    fn test_missing_id_or_img_drops_image() {
        let no_id = RawRecord {
            id: None,
            ..full_record()
        };
        let no_img = RawRecord {
            img: None,
            ..full_record()
        };
        let config = UrlConfig::default();
        assert_eq!(derive_display_urls(&no_id, &config).image_url, None);
        assert_eq!(derive_display_urls(&no_img, &config).image_url, None);
    }

    #[test]
    fn test_missing_slug_drops_article() {
        let record = RawRecord {
            slug: None,
            ..full_record()
        };
        let urls = derive_display_urls(&record, &UrlConfig::default());
        assert_eq!(urls.article_url, None);
        assert!(urls.image_url.is_some());
    }

    #[test]
    fn test_empty_record() {
        assert_eq!(
            derive_display_urls(&RawRecord::default(), &UrlConfig::default()),
            DisplayUrls::default()
        );
    }

    #[test]
    fn test_trailing_slash_base_and_text_id() {
        let config = UrlConfig {
            image_base: Url::parse("https://cdn.example.com/thumbs/").unwrap(),
            article_base: Url::parse("https://example.com/").unwrap(),
        };
        let record = RawRecord {
            id: Some(RecordId::Text("w-7".to_string())),
            ..full_record()
        };
        let urls = derive_display_urls(&record, &config);
        assert_eq!(
            urls.image_url.as_deref(),
            Some("https://cdn.example.com/thumbs/w-7/av_thumb__casa.jpg?h=9f2c")
        );
        assert_eq!(
            urls.article_url.as_deref(),
            Some("https://example.com/casa-en-la-playa")
        );
    }
}
