use serde::{Deserialize, Serialize};

use crate::auth::password::MAX_PASSWORD_BYTES;
use crate::database::{Post, User};

/// 与 users.email 列宽度一致
pub const MAX_EMAIL_BYTES: usize = 255;

// 注册和登录共用的请求体
#[derive(Debug, Deserialize)]
pub struct UserLogin {
    pub email: String,
    pub password: String,
}

// 用户基本信息（响应）
#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub id: i64,
    pub email: String,
    pub posts: Vec<Post>,
}

// 注册响应
#[derive(Debug, Serialize)]
pub struct UserWithToken {
    pub access_token: String,
    pub user: UserInfo,
}

// 登录响应
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
}

impl From<User> for UserInfo {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            posts: Vec::new(),
        }
    }
}

impl UserLogin {
    /// 返回第一条校验失败的原因
    pub fn validate(&self) -> Option<&'static str> {
        if !is_valid_email(&self.email) {
            return Some("邮箱格式无效");
        }
        if self.password.is_empty() {
            return Some("密码不能为空");
        }
        if self.password.len() > MAX_PASSWORD_BYTES {
            return Some("密码长度不能超过72字节");
        }
        None
    }
}

fn is_valid_email(email: &str) -> bool {
    if email.len() > MAX_EMAIL_BYTES || email.chars().any(char::is_whitespace) {
        return false;
    }
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn login(email: &str, password: &str) -> UserLogin {
        UserLogin {
            email: email.into(),
            password: password.into(),
        }
    }

    #[test]
    fn accepts_plain_addresses() {
        assert_eq!(login("a@x.com", "pw1").validate(), None);
        assert_eq!(login("first.last@mail.example.org", "pw").validate(), None);
    }

    #[test]
    fn rejects_malformed_addresses() {
        for email in ["", "a", "a@", "@x.com", "a@x", "a@@x.com", "a b@x.com", "a@x.com."] {
            assert!(login(email, "pw").validate().is_some(), "{email}");
        }

        let too_long = format!("{}@x.com", "a".repeat(MAX_EMAIL_BYTES));
        assert!(login(&too_long, "pw").validate().is_some());

        let longest = format!("{}@x.com", "a".repeat(MAX_EMAIL_BYTES - 6));
        assert_eq!(longest.len(), MAX_EMAIL_BYTES);
        assert_eq!(login(&longest, "pw").validate(), None);
    }

    #[test]
    fn rejects_empty_password() {
        assert!(login("a@x.com", "").validate().is_some());
    }

    #[test]
    fn rejects_passwords_bcrypt_would_truncate() {
        assert_eq!(login("a@x.com", &"p".repeat(MAX_PASSWORD_BYTES)).validate(), None);
        assert!(login("a@x.com", &"p".repeat(MAX_PASSWORD_BYTES + 1)).validate().is_some());
    }
}
