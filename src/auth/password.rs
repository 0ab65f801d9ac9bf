use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use bcrypt::{non_truncating_hash, non_truncating_verify};

/// bcrypt 只处理前 72 字节，超出的密码直接拒绝
pub const MAX_PASSWORD_BYTES: usize = 72;

/// 邮箱不存在时用于比对的占位密码
const DUMMY_PASSWORD: &str = "dummy-password-for-unknown-accounts";

/// 密码哈希与校验，使用带随机盐的 bcrypt
#[derive(Debug, Clone)]
pub struct CredentialStore {
    cost: u32,
    /// 与真实哈希同样代价的占位哈希，启动时计算一次
    dummy_hash: Arc<str>,
    verify_calls: Arc<AtomicU64>,
}

impl CredentialStore {
    pub fn new(cost: u32) -> Self {
        let dummy_hash = non_truncating_hash(DUMMY_PASSWORD, cost).unwrap_or_else(|e| {
            tracing::warn!("Failed to compute dummy password hash: {}", e);
            String::new()
        });

        Self {
            cost,
            dummy_hash: dummy_hash.into(),
            verify_calls: Arc::new(AtomicU64::new(0)),
        }
    }

    /// 超过 72 字节的密码返回错误，不做截断
    pub fn hash(&self, password: &str) -> Result<String, bcrypt::BcryptError> {
        non_truncating_hash(password.as_bytes(), self.cost)
    }

    /// 存储的哈希格式损坏或密码超长时视为校验失败
    pub fn verify(&self, password: &str, hash: &str) -> bool {
        self.verify_calls.fetch_add(1, Ordering::Relaxed);
        if password.len() > MAX_PASSWORD_BYTES {
            return false;
        }
        match non_truncating_verify(password.as_bytes(), hash) {
            Ok(matched) => matched,
            Err(e) => {
                tracing::warn!("Failed to verify password hash: {}", e);
                false
            }
        }
    }

    /// 对占位哈希做一次完整校验，使未知邮箱的登录耗时与密码错误一致；总是返回 false
    pub fn verify_unknown(&self, password: &str) -> bool {
        let dummy_hash = Arc::clone(&self.dummy_hash);
        self.verify(password, &dummy_hash);
        false
    }

    /// 累计校验次数
    pub fn verify_count(&self) -> u64 {
        self.verify_calls.load(Ordering::Relaxed)
    }
}
