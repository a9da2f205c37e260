//! Where the CLI reads shops from: the shop API or a local catalog file.

use std::path::{Path, PathBuf};

use shopdir_client::ShopApiClient;
use shopdir_core::{AppConfig, GeoPoint, ShopRecord};

pub(crate) enum ShopSource {
    Api(ShopApiClient),
    Catalog {
        path: PathBuf,
        shops: Vec<ShopRecord>,
    },
}

impl ShopSource {
    /// Uses the catalog at `shops_file` when given, otherwise the shop API
    /// configured by `SHOPDIR_API_URL`.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be loaded or the API client
    /// cannot be built.
    pub(crate) fn from_args(shops_file: Option<&Path>, config: &AppConfig) -> anyhow::Result<Self> {
        if let Some(path) = shops_file {
            let shops = shopdir_core::load_catalog(path)?;
            tracing::info!(path = %path.display(), count = shops.len(), "loaded shop catalog");
            return Ok(Self::Catalog {
                path: path.to_path_buf(),
                shops,
            });
        }

        let client = ShopApiClient::from_config(config)
            .map_err(|e| anyhow::anyhow!("failed to build shop API client: {e}"))?;
        tracing::debug!(api_url = %config.api_url, "using shop API");
        Ok(Self::Api(client))
    }

    pub(crate) async fn all(&self) -> anyhow::Result<Vec<ShopRecord>> {
        match self {
            Self::Api(client) => Ok(client.list_shops().await?),
            Self::Catalog { shops, .. } => Ok(shops.clone()),
        }
    }

    /// Candidates for a radius search. The API pre-filters server-side; the
    /// catalog returns everything and leaves filtering to the pipeline.
    pub(crate) async fn near(
        &self,
        reference: GeoPoint,
        radius_km: f64,
    ) -> anyhow::Result<Vec<ShopRecord>> {
        match self {
            Self::Api(client) => Ok(client
                .nearby_shops(reference.lat(), reference.lon(), radius_metres(radius_km))
                .await?),
            Self::Catalog { shops, .. } => Ok(shops.clone()),
        }
    }

    pub(crate) async fn find(&self, id: &str) -> anyhow::Result<ShopRecord> {
        match self {
            Self::Api(client) => client
                .get_shop(id)
                .await
                .map_err(|e| anyhow::anyhow!("failed to fetch shop '{id}': {e}")),
            Self::Catalog { path, shops } => shops
                .iter()
                .find(|shop| shop.id == id)
                .cloned()
                .ok_or_else(|| anyhow::anyhow!("shop '{id}' not found in {}", path.display())),
        }
    }
}

/// Kilometres to whole metres for the API's `radius` parameter, saturating
/// at the `u32` range.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn radius_metres(radius_km: f64) -> u32 {
    let metres = (radius_km * 1000.0).ceil();
    if metres.is_nan() || metres <= 0.0 {
        0
    } else if metres >= f64::from(u32::MAX) {
        u32::MAX
    } else {
        metres as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn radius_metres_rounds_up() {
        assert_eq!(radius_metres(5.0), 5000);
        assert_eq!(radius_metres(0.0012), 2);
    }

    #[test]
    fn radius_metres_saturates() {
        assert_eq!(radius_metres(-1.0), 0);
        assert_eq!(radius_metres(f64::NAN), 0);
        assert_eq!(radius_metres(f64::INFINITY), u32::MAX);
    }

    #[tokio::test]
    async fn catalog_find_reports_missing_id() {
        let source = ShopSource::Catalog {
            path: PathBuf::from("shops.yaml"),
            shops: vec![ShopRecord {
                id: "1".to_string(),
                name: "Bakery".to_string(),
                ..ShopRecord::default()
            }],
        };
        assert_eq!(source.find("1").await.unwrap().name, "Bakery");
        let err = source.find("9").await.unwrap_err();
        assert!(err.to_string().contains("shop '9' not found"));
    }
}
