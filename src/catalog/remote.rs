//! Published JSON catalog fetch

use crate::catalog::{AppRecord, CatalogError};

pub async fn fetch_catalog(
    client: &reqwest::Client,
    url: &str,
) -> Result<Vec<AppRecord>, CatalogError> {
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(CatalogError::Status {
            url: url.to_string(),
            status,
        });
    }
    Ok(response.json().await?)
}
