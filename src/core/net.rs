use crate::core::EdinetError;

/// Map a non-2xx response to [`EdinetError::Status`], passing 2xx through.
pub(crate) fn expect_success(resp: reqwest::Response) -> Result<reqwest::Response, EdinetError> {
    let status = resp.status();
    if status.is_success() {
        Ok(resp)
    } else {
        Err(EdinetError::Status {
            status: status.as_u16(),
            url: resp.url().to_string(),
        })
    }
}
