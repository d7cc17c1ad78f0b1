//! Fork/join adapter over the work-stealing pool.
//!
//! A search runs inside one [`fork_join`] region. Jobs [`fork`](Forker::fork)
//! children into that region and return without waiting for them; the region
//! ends once every forked job has finished, after which each [`Forked`]
//! handle holds its job's result.
//!
//! With the `parallel` feature the region is a single [`rayon::scope`]:
//! children are pushed onto the current worker's deque and idle workers steal
//! them. No job blocks inside the region, so a worker's stack holds one job at
//! a time however deep the fork tree grows. Without the feature, forked jobs
//! go on a LIFO queue that the calling thread drains after the root job.

use std::sync::{Arc, OnceLock};

use crate::error::Result;

/// Result slot of a forked job.
#[derive(Debug)]
pub struct Forked<T> {
    slot: Arc<OnceLock<T>>,
}

impl<T> Forked<T> {
    /// Take the job's result.
    ///
    /// Handles are only taken apart after their [`fork_join`] region ended,
    /// so `None` means the job never ran to completion.
    pub fn join(self) -> Option<T> {
        Arc::try_unwrap(self.slot).ok().and_then(OnceLock::into_inner)
    }

    #[cfg(test)]
    pub(crate) fn ready(value: T) -> Self {
        Self {
            slot: Arc::new(OnceLock::from(value)),
        }
    }

    #[cfg(test)]
    pub(crate) fn unfinished() -> Self {
        Self {
            slot: Arc::new(OnceLock::new()),
        }
    }
}

#[cfg(feature = "parallel")]
pub struct Forker<'a, 'scope> {
    scope: &'a rayon::Scope<'scope>,
}

#[cfg(feature = "parallel")]
impl<'scope> Forker<'_, 'scope> {
    /// Schedule `job` asynchronously; it receives a forker of its own.
    pub fn fork<T, F>(&self, job: F) -> Forked<T>
    where
        F: FnOnce(&Forker<'_, 'scope>) -> T + Send + 'scope,
        T: Send + Sync + 'scope,
    {
        let slot = Arc::new(OnceLock::new());
        let out = Arc::clone(&slot);
        self.scope.spawn(move |scope| {
            let _ = out.set(job(&Forker { scope }));
        });
        Forked { slot }
    }
}

/// Run `op`, then wait for everything forked from it, transitively.
#[cfg(feature = "parallel")]
pub fn fork_join<'scope, R, OP>(op: OP) -> R
where
    OP: FnOnce(&Forker<'_, 'scope>) -> R + Send,
    R: Send,
{
    rayon::scope(|scope| op(&Forker { scope }))
}

#[cfg(not(feature = "parallel"))]
type Job<'scope> = Box<dyn for<'f> FnOnce(&Forker<'f, 'scope>) + 'scope>;

#[cfg(not(feature = "parallel"))]
pub struct Forker<'a, 'scope> {
    queue: &'a std::cell::RefCell<Vec<Job<'scope>>>,
}

#[cfg(not(feature = "parallel"))]
impl<'scope> Forker<'_, 'scope> {
    /// Queue `job`; it runs on the calling thread once the current job returns.
    pub fn fork<T, F>(&self, job: F) -> Forked<T>
    where
        F: FnOnce(&Forker<'_, 'scope>) -> T + Send + 'scope,
        T: Send + Sync + 'scope,
    {
        let slot = Arc::new(OnceLock::new());
        let out = Arc::clone(&slot);
        self.queue
            .borrow_mut()
            .push(Box::new(move |forker: &Forker<'_, 'scope>| {
                let _ = out.set(job(forker));
            }));
        Forked { slot }
    }
}

/// Run `op`, then drain everything forked from it, transitively.
#[cfg(not(feature = "parallel"))]
pub fn fork_join<'scope, R, OP>(op: OP) -> R
where
    OP: FnOnce(&Forker<'_, 'scope>) -> R + Send,
    R: Send,
{
    let queue = std::cell::RefCell::new(Vec::new());
    let forker = Forker { queue: &queue };
    let result = op(&forker);
    loop {
        let next = queue.borrow_mut().pop();
        match next {
            Some(job) => job(&forker),
            None => break result,
        }
    }
}

/// Worker pool settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolConfig {
    /// Number of worker threads; `None` uses one per logical CPU.
    pub num_threads: Option<usize>,
    /// Stack size per worker, in bytes.
    pub stack_size: Option<usize>,
}

/// Pool that searches run on, built once per solver.
#[derive(Debug)]
pub struct WorkerPool {
    #[cfg(feature = "parallel")]
    pool: Option<rayon::ThreadPool>,
}

impl WorkerPool {
    /// rayon's global pool.
    pub fn global() -> Self {
        Self {
            #[cfg(feature = "parallel")]
            pool: None,
        }
    }

    /// A default config shares the global pool; anything else builds a
    /// dedicated one.
    pub fn new(config: PoolConfig) -> Result<Self> {
        #[cfg(feature = "parallel")]
        {
            if config == PoolConfig::default() {
                return Ok(Self::global());
            }
            let mut builder =
                rayon::ThreadPoolBuilder::new().thread_name(|i| format!("fj-maze-{i}"));
            if let Some(n) = config.num_threads.filter(|&n| n > 0) {
                builder = builder.num_threads(n);
            }
            if let Some(bytes) = config.stack_size {
                builder = builder.stack_size(bytes);
            }
            Ok(Self {
                pool: Some(builder.build()?),
            })
        }
        #[cfg(not(feature = "parallel"))]
        {
            let _ = config;
            Ok(Self::global())
        }
    }

    /// Run `op` on this pool and return its result.
    pub fn install<R, OP>(&self, op: OP) -> R
    where
        OP: FnOnce() -> R + Send,
        R: Send,
    {
        #[cfg(feature = "parallel")]
        if let Some(pool) = &self.pool {
            return pool.install(op);
        }
        op()
    }
}
