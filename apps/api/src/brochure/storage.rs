use anyhow::Result;
use aws_sdk_s3::primitives::ByteStream;
use tracing::info;

/// Uploads the generated brochure under a stable key so the link can be
/// shared from chat and lead follow-ups. Returns the object key.
pub async fn upload_brochure(
    s3: &aws_sdk_s3::Client,
    bucket: &str,
    slug: &str,
    bytes: Vec<u8>,
) -> Result<String> {
    let key = format!("brochures/{slug}.pdf");
    s3.put_object()
        .bucket(bucket)
        .key(&key)
        .body(ByteStream::from(bytes))
        .content_type("application/pdf")
        .send()
        .await
        .map_err(|e| anyhow::anyhow!("S3 upload failed: {e}"))?;

    info!("Uploaded brochure to s3://{bucket}/{key}");
    Ok(key)
}

/// Browser-reachable URL for an uploaded object (MinIO locally, AWS in
/// production).
pub fn public_url(endpoint: &str, bucket: &str, key: &str) -> String {
    format!("{}/{bucket}/{key}", endpoint.trim_end_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_url_joins_without_double_slash() {
        assert_eq!(
            public_url("http://localhost:9000/", "static", "brochures/x.pdf"),
            "http://localhost:9000/static/brochures/x.pdf"
        );
        assert_eq!(
            public_url("https://s3.amazonaws.com", "static", "brochures/x.pdf"),
            "https://s3.amazonaws.com/static/brochures/x.pdf"
        );
    }
}
