//! Wire types of the media-addon protocol

use serde::Serialize;

pub const CONTENT_TYPE_TV: &str = "tv";

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    pub id: String,
    pub version: String,
    pub name: String,
    pub description: String,
    pub resources: Vec<ManifestResource>,
    pub types: Vec<String>,
    pub catalogs: Vec<CatalogDescriptor>,
    pub behavior_hints: BehaviorHints,
    pub logo: String,
    pub background: String,
    pub contact_email: String,
}

/// Either a bare resource name or a scoped resource description
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum ManifestResource {
    Name(String),
    Scoped {
        name: String,
        types: Vec<String>,
        #[serde(rename = "idPrefixes")]
        id_prefixes: Vec<String>,
    },
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CatalogDescriptor {
    #[serde(rename = "type")]
    pub kind: String,
    pub id: String,
    pub name: String,
    pub extra: Vec<ExtraDescriptor>,
    pub genres: Vec<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExtraDescriptor {
    pub name: String,
    pub is_required: bool,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BehaviorHints {
    pub configurable: bool,
    pub configuration_required: bool,
}

/// Catalog entry
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MetaPreview {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    pub genres: Vec<String>,
    pub poster: String,
    pub poster_shape: String,
    pub background: String,
    pub logo: String,
}

/// Full channel description returned by the meta resource
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MetaDetail {
    #[serde(flatten)]
    pub preview: MetaPreview,
    pub description: String,
    pub release_info: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StreamDescriptor {
    pub url: String,
    pub title: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Default)]
pub struct CatalogResponse {
    pub metas: Vec<MetaPreview>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Default)]
pub struct MetaResponse {
    pub meta: Option<MetaDetail>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Default)]
pub struct StreamResponse {
    pub streams: Vec<StreamDescriptor>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn meta_detail_flattens_preview_fields() {
        let detail = MetaDetail {
            preview: MetaPreview {
                id: "vavoo_1".into(),
                kind: CONTENT_TYPE_TV.into(),
                name: "Rai 1".into(),
                genres: vec!["GENERAL".into()],
                poster: "p".into(),
                poster_shape: "square".into(),
                background: "b".into(),
                logo: "l".into(),
            },
            description: "d".into(),
            release_info: "24/7 Live".into(),
        };
        let value = serde_json::to_value(&detail).unwrap();
        assert_eq!(value["type"], "tv");
        assert_eq!(value["posterShape"], "square");
        assert_eq!(value["releaseInfo"], "24/7 Live");
        assert!(value.get("preview").is_none());
    }

    #[test]
    fn empty_responses_serialize_to_protocol_shapes() {
        assert_eq!(serde_json::to_value(MetaResponse::default()).unwrap(), json!({"meta": null}));
        assert_eq!(
            serde_json::to_value(StreamResponse::default()).unwrap(),
            json!({"streams": []})
        );
        assert_eq!(serde_json::to_value(CatalogResponse::default()).unwrap(), json!({"metas": []}));
    }

    #[test]
    fn scoped_resource_uses_id_prefixes_key() {
        let resource = ManifestResource::Scoped {
            name: "meta".into(),
            types: vec!["tv".into()],
            id_prefixes: vec!["vavoo_".into()],
        };
        assert_eq!(
            serde_json::to_value(resource).unwrap(),
            json!({"name": "meta", "types": ["tv"], "idPrefixes": ["vavoo_"]})
        );
    }
}
