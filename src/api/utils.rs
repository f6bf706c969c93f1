use reqwest::{Client, Response};
use serde_json::Value;

use crate::error::TrackingError;

pub async fn make_request(
    client: &Client,
    base_url: &str,
    endpoint: &str,
    params: &[(&str, &str)],
) -> Result<Response, TrackingError> {
    let url = format!("{}/{}", base_url, endpoint);
    let res = client.get(&url).query(params).send().await?;

    if !res.status().is_success() {
        return Err(TrackingError::Transport(format!(
            "Request failed: {}",
            res.status()
        )));
    }

    Ok(res)
}

pub async fn read_text(res: Response) -> Result<String, TrackingError> {
    Ok(res.text().await?)
}

pub async fn read_json(res: Response) -> Result<Value, TrackingError> {
    let text = res.text().await?;
    let data = serde_json::from_str::<Value>(&text)?;

    match data {
        Value::Object(_) => Ok(data),
        _ => Err(TrackingError::Transport(
            "Unexpected API response format: not an object".to_string(),
        )),
    }
}
