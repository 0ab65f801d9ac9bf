use std::env;
use std::str::FromStr;
use std::time::Duration;

use jsonwebtoken::Algorithm;

/// 配置加载错误
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing environment variable {0}")]
    Missing(&'static str),
    #[error("invalid value {value:?} for {var}")]
    Invalid { var: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    /// 为空时使用内存存储
    pub database_url: Option<String>,
    /// 为空时使用进程内缓存
    pub redis_url: Option<String>,
    pub jwt_secret: String,
    pub jwt_algorithm: Algorithm,
    pub jwt_expiration_secs: u64,
    pub max_post_size: usize,
    pub posts_cache_capacity: u64,
    pub posts_cache_ttl_secs: u64,
    pub bcrypt_cost: u32,
    pub server_host: String,
    pub server_port: u16,
    pub api_base_uri: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();

        let jwt_secret = env::var("JWT_SECRET").map_err(|_| ConfigError::Missing("JWT_SECRET"))?;
        if jwt_secret.is_empty() {
            return Err(ConfigError::Invalid {
                var: "JWT_SECRET",
                value: String::new(),
            });
        }

        let jwt_algorithm = parse_algorithm(&var_or("JWT_ALGORITHM", "HS256"))?;

        Ok(Config {
            database_url: env::var("DATABASE_URL").ok().filter(|v| !v.is_empty()),
            redis_url: env::var("REDIS_URL").ok().filter(|v| !v.is_empty()),
            jwt_secret,
            jwt_algorithm,
            jwt_expiration_secs: parse_secs("JWT_EXPIRATION", &var_or("JWT_EXPIRATION", "30m"))?,
            max_post_size: parse_var("MAX_POST_SIZE", 10_000)?,
            posts_cache_capacity: parse_var("POSTS_CACHE_CAPACITY", 100)?,
            posts_cache_ttl_secs: parse_secs("POSTS_CACHE_TTL", &var_or("POSTS_CACHE_TTL", "60s"))?,
            bcrypt_cost: parse_var("BCRYPT_COST", bcrypt::DEFAULT_COST)?,
            server_host: var_or("SERVER_HOST", "0.0.0.0"),
            server_port: parse_var("SERVER_PORT", 3000)?,
            api_base_uri: var_or("API_BASE_URI", "/api"),
        })
    }

    pub fn jwt_expiration(&self) -> Duration {
        Duration::from_secs(self.jwt_expiration_secs)
    }

    pub fn posts_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.posts_cache_ttl_secs)
    }
}

fn var_or(var: &str, default: &str) -> String {
    env::var(var).unwrap_or_else(|_| default.to_string())
}

fn parse_var<T: FromStr>(var: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(var) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { var, value }),
        Err(_) => Ok(default),
    }
}

/// 只接受 HMAC 算法，签名密钥是共享密钥
fn parse_algorithm(value: &str) -> Result<Algorithm, ConfigError> {
    match Algorithm::from_str(value.trim()) {
        Ok(alg @ (Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512)) => Ok(alg),
        _ => Err(ConfigError::Invalid {
            var: "JWT_ALGORITHM",
            value: value.to_string(),
        }),
    }
}

/// 解析 "90"、"90s"、"30m"、"24h" 形式的时长，返回秒数
pub fn parse_duration_secs(value: &str) -> Option<u64> {
    let value = value.trim();
    let (number, unit) = match value.char_indices().last()? {
        (idx, 's') => (&value[..idx], 1),
        (idx, 'm') => (&value[..idx], 60),
        (idx, 'h') => (&value[..idx], 3600),
        _ => (value, 1),
    };
    number.trim().parse::<u64>().ok()?.checked_mul(unit)
}

fn parse_secs(var: &'static str, value: &str) -> Result<u64, ConfigError> {
    parse_duration_secs(value).ok_or_else(|| ConfigError::Invalid {
        var,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_duration_suffixes() {
        assert_eq!(parse_duration_secs("90"), Some(90));
        assert_eq!(parse_duration_secs("45s"), Some(45));
        assert_eq!(parse_duration_secs("30m"), Some(1800));
        assert_eq!(parse_duration_secs("24h"), Some(86_400));
        assert_eq!(parse_duration_secs(" 2h "), Some(7200));
    }

    #[test]
    fn rejects_bad_durations() {
        assert_eq!(parse_duration_secs(""), None);
        assert_eq!(parse_duration_secs("h"), None);
        assert_eq!(parse_duration_secs("ten minutes"), None);
        assert_eq!(parse_duration_secs("-5m"), None);
    }

    #[test]
    fn only_hmac_algorithms_are_accepted() {
        assert_eq!(parse_algorithm("HS384").ok(), Some(Algorithm::HS384));
        assert!(matches!(
            parse_algorithm("RS256"),
            Err(ConfigError::Invalid { var: "JWT_ALGORITHM", .. })
        ));
        assert!(parse_algorithm("nope").is_err());
    }
}
