//! Synthetic record catalog
//!
//! The data source behind the picker: a fixed collection of records
//! synthesized on first access and memoized for the life of the process.
//! The catalog is an explicit, injectable value rather than ambient global
//! state, so tests can construct isolated instances.

use std::sync::Arc;

use parking_lot::Mutex;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Default number of records synthesized by a catalog
pub const DEFAULT_RECORD_COUNT: usize = 20_000;

/// Source tags cycled across the generated records
pub const SOURCE_TAGS: [&str; 5] = ["ironbank", "database", "api", "file", "cache"];

/// Display-name templates cycled across the generated records
pub const NAME_TEMPLATES: [&str; 15] = [
    "测试RAG问答",
    "数据分析报告",
    "用户行为统计",
    "系统性能监控",
    "业务流程优化",
    "机器学习模型",
    "自然语言处理",
    "图像识别算法",
    "推荐系统优化",
    "搜索引擎优化",
    "数据可视化",
    "实时数据处理",
    "批量数据导入",
    "数据清洗任务",
    "数据备份恢复",
];

/// One synthetic data entity
///
/// Identity is by `pid`; `name` and `datasource` are fixed at generation
/// time and immutable thereafter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Opaque unique token, hyphenated segments; not validated as a UUID
    pub pid: String,
    /// Display name: cyclic template plus a zero-padded running index
    pub name: String,
    /// Cyclic tag from [`SOURCE_TAGS`]
    pub datasource: String,
}

/// Wire shape of the `/api/data` success response
#[derive(Debug, Serialize, Deserialize)]
pub struct DataResponse {
    pub data: Vec<Record>,
    pub total: usize,
}

/// Wire shape of the `/api/data` failure response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Source of the full record collection
///
/// `fetch_all` is idempotent and side-effect-free from the caller's
/// perspective after the first call: every invocation returns a collection
/// of identical length and identical identifiers.
pub trait DataProvider: Send + Sync {
    /// Fetch the full record collection, generating it if necessary.
    ///
    /// Must never return partial data: a failed generation surfaces as an
    /// error with the cache left empty.
    fn fetch_all(&self) -> Result<Arc<Vec<Record>>>;
}

/// Lazily-generated, memoized record collection
///
/// The cache is created on first `fetch_all`, lives for the process, and is
/// never invalidated or resized. Record identifiers are random and not
/// reproducible across runs; generation order is deterministic given the
/// templates.
pub struct Catalog {
    count: usize,
    cache: Mutex<Option<Arc<Vec<Record>>>>,
}

impl Catalog {
    pub fn new(count: usize) -> Self {
        Self {
            count,
            cache: Mutex::new(None),
        }
    }

    /// Number of records this catalog generates
    pub fn count(&self) -> usize {
        self.count
    }

    fn generate(count: usize) -> Vec<Record> {
        let mut rng = rand::rng();
        let mut records = Vec::with_capacity(count);

        for i in 0..count {
            let template = NAME_TEMPLATES[i % NAME_TEMPLATES.len()];
            let datasource = SOURCE_TAGS[i % SOURCE_TAGS.len()];

            records.push(Record {
                pid: random_pid(&mut rng),
                name: format!("{}_{:06}", template, i + 1),
                datasource: datasource.to_string(),
            });
        }

        records
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new(DEFAULT_RECORD_COUNT)
    }
}

impl DataProvider for Catalog {
    fn fetch_all(&self) -> Result<Arc<Vec<Record>>> {
        let mut cache = self.cache.lock();

        if let Some(records) = cache.as_ref() {
            return Ok(Arc::clone(records));
        }

        let records = Arc::new(Self::generate(self.count));
        *cache = Some(Arc::clone(&records));
        Ok(records)
    }
}

const TOKEN_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Random hyphenated identifier shaped `8-4-4-4-12` over base-36 characters
fn random_pid(rng: &mut impl Rng) -> String {
    let mut segment = |len: usize| -> String {
        (0..len)
            .map(|_| TOKEN_ALPHABET[rng.random_range(0..TOKEN_ALPHABET.len())] as char)
            .collect()
    };

    format!(
        "{}-{}-{}-{}-{}",
        segment(8),
        segment(4),
        segment(4),
        segment(4),
        segment(12)
    )
}
