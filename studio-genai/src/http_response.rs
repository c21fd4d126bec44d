use studio_genai_types::http::ApiErrorEnvelope;

use crate::error::Error;

/// 把非 2xx 响应体规范化为 [`Error::ApiError`]。
///
/// 优先使用错误包装中的 `message` / `status`；包装无法解析时保留原始文本。
pub(crate) fn api_error_from_body(status: u16, body: &str) -> Error {
    match serde_json::from_str::<ApiErrorEnvelope>(body) {
        Ok(envelope) => {
            let error = envelope.error;
            let message = error
                .message
                .filter(|message| !message.trim().is_empty())
                .unwrap_or_else(|| body.to_string());
            Error::ApiError {
                status,
                status_name: error.status,
                message,
            }
        }
        Err(_) => Error::ApiError {
            status,
            status_name: None,
            message: body.to_string(),
        },
    }
}

/// 读取失败响应并转换为错误。
pub(crate) async fn api_error_from_response(response: reqwest::Response) -> Error {
    let status = response.status().as_u16();
    api_error_from_read(status, response.text().await)
}

/// 错误体读取失败时保留状态码，并把读取错误写入 `message`。
fn api_error_from_read<E: std::fmt::Display>(
    status: u16,
    body: std::result::Result<String, E>,
) -> Error {
    match body {
        Ok(body) => api_error_from_body(status, &body),
        Err(err) => Error::ApiError {
            status,
            status_name: None,
            message: format!("failed to read error body: {err}"),
        },
    }
}
