use crate::utils::error::Result;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn output_path(&self) -> &str;
    fn output_format(&self) -> &str;
    fn max_shuffle_attempts(&self) -> usize;
    fn seed(&self) -> Option<u64>;
    /// `None` means the current calendar year.
    fn year(&self) -> Option<i32>;
}
