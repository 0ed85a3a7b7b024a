//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。

use std::fmt;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_linklearn_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum LinkLearnError {
            $($variant(String),)*
        }

        impl LinkLearnError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(LinkLearnError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(LinkLearnError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(LinkLearnError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl LinkLearnError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        LinkLearnError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_linklearn_errors! {
    DatabaseConfig("E001", "Database Configuration Error"),
    DatabaseConnection("E002", "Database Connection Error"),
    DatabaseOperation("E003", "Database Operation Error"),
    Validation("E004", "Validation Error"),
    NotFound("E005", "Resource Not Found"),
    Conflict("E006", "Resource Conflict"),
    Serialization("E007", "Serialization Error"),
    DateParse("E008", "Date Parse Error"),
    Authentication("E009", "Authentication Error"),
    Authorization("E010", "Authorization Error"),
}

impl LinkLearnError {
    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for LinkLearnError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for LinkLearnError {}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for LinkLearnError {
    fn from(err: sea_orm::DbErr) -> Self {
        LinkLearnError::DatabaseOperation(err.to_string())
    }
}

impl From<serde_json::Error> for LinkLearnError {
    fn from(err: serde_json::Error) -> Self {
        LinkLearnError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for LinkLearnError {
    fn from(err: chrono::ParseError) -> Self {
        LinkLearnError::DateParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, LinkLearnError>;
