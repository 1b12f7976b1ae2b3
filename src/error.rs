use costwise_shared::FieldErrors;

// =========================================================
// 客户端错误类型
// =========================================================

/// 客户端错误
///
/// 所有错误都在触发操作的调用点被捕获，并以 `Display` 输出的单行消息展示给用户。
/// 没有任何错误是致命的：失败后界面保持可恢复状态，等待用户下一步操作。
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ClientError {
    /// 认证服务拒绝了用户名/密码组合
    #[error("{message}")]
    InvalidCredentials { message: String },

    /// 两次输入的密码不一致（在发出任何请求之前检查）
    #[error("Passwords do not match")]
    PasswordMismatch,

    /// 服务端拒绝注册，`message` 为第一条字段错误
    #[error("{message}")]
    RegistrationRejected { message: String, fields: FieldErrors },

    #[error("Failed to fetch items")]
    FetchError { status: u16 },

    #[error("Failed to create item")]
    CreateError { status: u16 },

    #[error("Failed to update item")]
    UpdateError { status: u16 },

    #[error("Failed to delete item")]
    DeleteError { status: u16 },

    /// 传输层失败（主机不可达等）
    #[error("Network error: {0}")]
    NetworkError(String),

    /// 表单输入无法编码为请求
    #[error("{0}")]
    InvalidDraft(String),

    /// 2xx 响应但响应体无法解析
    #[error("Unexpected response from server: {0}")]
    MalformedResponse(String),
}

impl ClientError {
    pub const DEFAULT_LOGIN_MESSAGE: &'static str = "Login failed";
    pub const DEFAULT_REGISTRATION_MESSAGE: &'static str = "Registration failed";

    pub fn invalid_credentials(message: Option<&str>) -> Self {
        Self::InvalidCredentials {
            message: message
                .unwrap_or(Self::DEFAULT_LOGIN_MESSAGE)
                .to_string(),
        }
    }

    pub fn registration_rejected(fields: FieldErrors) -> Self {
        let message = fields
            .first_message()
            .unwrap_or(Self::DEFAULT_REGISTRATION_MESSAGE)
            .to_string();
        Self::RegistrationRejected { message, fields }
    }

    /// 展示给用户的消息
    pub fn user_message(&self) -> String {
        self.to_string()
    }

    /// 如果错误来自非 2xx 响应，返回其状态码
    pub fn http_status(&self) -> Option<u16> {
        match self {
            ClientError::FetchError { status }
            | ClientError::CreateError { status }
            | ClientError::UpdateError { status }
            | ClientError::DeleteError { status } => Some(*status),
            _ => None,
        }
    }
}

pub type ClientResult<T> = std::result::Result<T, ClientError>;
