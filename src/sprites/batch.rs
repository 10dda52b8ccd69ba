use rayon::prelude::*;

use crate::{
    assets::raster::Raster,
    config::meter::MeterGeometry,
    foundation::error::{NeedleError, NeedleResult},
    rotate::rotozoom::ImageRotator,
    sprites::{cache::NeedleCache, factory::NeedleSprites},
};

/// One instrument to prepare.
#[derive(Clone, Copy, Debug)]
pub struct NeedleRequest<'a> {
    /// Instrument name used as cache key.
    pub name: &'a str,
    /// Unrotated needle image.
    pub image: &'a Raster,
    /// Sweep and pivot geometry.
    pub geometry: &'a MeterGeometry,
}

/// Worker pool controls for [`prepare_many`].
#[derive(Clone, Debug, Default)]
pub struct PrepareThreading {
    /// Build instruments in parallel when `true`.
    pub parallel: bool,
    /// Optional explicit worker thread count.
    pub threads: Option<usize>,
}

/// Prepare several instruments, returning their animations in request order.
///
/// Every geometry is validated before any work starts. Distinct names build in parallel
/// when requested; repeated names still build once through the cache.
#[tracing::instrument(skip_all, fields(requests = requests.len()))]
pub fn prepare_many(
    cache: &NeedleCache,
    requests: &[NeedleRequest<'_>],
    rotator: &dyn ImageRotator,
    threading: &PrepareThreading,
) -> NeedleResult<Vec<NeedleSprites>> {
    for req in requests {
        req.geometry
            .validate()
            .map_err(|e| NeedleError::validation(format!("instrument '{}': {e}", req.name)))?;
    }

    let build = |req: &NeedleRequest<'_>| {
        cache.get_or_build(req.name, req.image, req.geometry, rotator)
    };

    if !threading.parallel {
        return Ok(requests.iter().map(build).collect());
    }

    let pool = build_thread_pool(threading.threads)?;
    Ok(pool.install(|| requests.par_iter().map(build).collect()))
}

fn build_thread_pool(threads: Option<usize>) -> NeedleResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(NeedleError::validation(
            "prepare threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| NeedleError::concurrency(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/sprites/batch.rs"]
mod tests;
