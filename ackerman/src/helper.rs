/// オーバーフローを検査する加算
pub trait SafeAdd: Sized {
    fn safe_add(&self, rhs: &Self) -> Option<Self>;
}

impl SafeAdd for u64 {
    fn safe_add(&self, rhs: &Self) -> Option<Self> {
        self.checked_add(*rhs)
    }
}

/// dst に src を加算し、オーバーフローした場合は f が返すエラーを返す。
/// エラー時 dst は変更しない。
pub fn safe_add<T, F, E>(dst: &mut T, src: &T, f: F) -> Result<(), E>
where
    T: SafeAdd,
    F: Fn() -> E,
{
    if let Some(n) = dst.safe_add(src) {
        *dst = n;
        Ok(())
    } else {
        Err(f())
    }
}

pub type DynError = Box<dyn std::error::Error + Send + Sync + 'static>;
