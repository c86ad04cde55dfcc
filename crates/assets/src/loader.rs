use crate::{AssetError, load_equirect_hdr};
use glasslab_scene::{EnvironmentMap, Scene};
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, TryRecvError};

/// Observable state of a background environment load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    Pending,
    Loaded,
    Failed,
}

enum LoadState {
    Pending(Receiver<Result<EnvironmentMap, AssetError>>),
    Loaded,
    Failed,
}

/// One-shot background loader for the scene's environment map.
///
/// The decode runs on its own thread and never blocks the caller. The result
/// is handed over through [`poll`](Self::poll), which the render thread calls
/// once per frame. A failed load is logged once and then stays failed; there
/// is no retry.
pub struct EnvironmentLoader {
    path: PathBuf,
    state: LoadState,
}

impl EnvironmentLoader {
    /// Start decoding `path` on a worker thread.
    pub fn spawn(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let (tx, rx) = mpsc::channel();
        let worker_path = path.clone();

        let spawned = std::thread::Builder::new()
            .name("environment-loader".into())
            .spawn(move || {
                let result = load_equirect_hdr(&worker_path);
                // Receiver may be gone if the app shut down first.
                let _ = tx.send(result);
            });

        let state = match spawned {
            Ok(_) => {
                tracing::info!(path = %path.display(), "environment load started");
                LoadState::Pending(rx)
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), "could not start environment loader: {e}");
                LoadState::Failed
            }
        };

        Self { path, state }
    }

    pub fn status(&self) -> LoadStatus {
        match self.state {
            LoadState::Pending(_) => LoadStatus::Pending,
            LoadState::Loaded => LoadStatus::Loaded,
            LoadState::Failed => LoadStatus::Failed,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.state, LoadState::Pending(_))
    }

    /// Take the decoded map if it has arrived. Yields `Some` at most once.
    pub fn poll(&mut self) -> Option<EnvironmentMap> {
        let LoadState::Pending(rx) = &self.state else {
            return None;
        };

        let result = match rx.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return None,
            Err(TryRecvError::Disconnected) => Err(AssetError::Disconnected),
        };

        match result {
            Ok(map) => {
                self.state = LoadState::Loaded;
                Some(map)
            }
            Err(e) => {
                tracing::warn!(path = %self.path.display(), "environment map unavailable: {e}");
                self.state = LoadState::Failed;
                None
            }
        }
    }

    /// Poll and, on arrival, install the map as the scene's background and
    /// lighting. Returns `true` on the frame the scene changed.
    pub fn install_into(&mut self, scene: &mut Scene) -> bool {
        match self.poll() {
            Some(map) => {
                let installed = scene.install_environment(map);
                if installed {
                    tracing::info!(path = %self.path.display(), "environment installed");
                }
                installed
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::write_hdr;
    use std::time::{Duration, Instant};

    /// Poll until the loader settles, mimicking a render loop.
    fn drive(loader: &mut EnvironmentLoader, scene: &mut Scene) -> usize {
        let deadline = Instant::now() + Duration::from_secs(10);
        let mut frames = 0;
        while loader.is_pending() && Instant::now() < deadline {
            // Invariant holds on every frame, loaded or not.
            assert_eq!(scene.background().is_some(), scene.environment().is_some());
            loader.install_into(scene);
            frames += 1;
            std::thread::sleep(Duration::from_millis(1));
        }
        frames
    }

    #[test]
    fn installs_background_and_environment_together() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("2k.hdr");
        write_hdr(&path, 16, 8);

        let mut scene = Scene::new();
        let mut loader = EnvironmentLoader::spawn(&path);
        assert!(!scene.has_environment());

        drive(&mut loader, &mut scene);

        assert_eq!(loader.status(), LoadStatus::Loaded);
        let env = scene.environment().unwrap();
        assert_eq!((env.width, env.height), (16, 8));
        assert!(scene.background().is_some());
    }

    #[test]
    fn yields_map_only_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("env.hdr");
        write_hdr(&path, 4, 2);

        let mut loader = EnvironmentLoader::spawn(&path);
        let deadline = Instant::now() + Duration::from_secs(10);
        let mut got = None;
        while got.is_none() && Instant::now() < deadline {
            got = loader.poll();
            std::thread::sleep(Duration::from_millis(1));
        }
        assert!(got.is_some());
        assert!(loader.poll().is_none());
        assert!(!loader.is_pending());
    }

    #[test]
    fn missing_file_leaves_scene_without_environment() {
        let dir = tempfile::tempdir().unwrap();
        let mut scene = Scene::new();
        let mut loader = EnvironmentLoader::spawn(dir.path().join("missing.hdr"));

        drive(&mut loader, &mut scene);

        assert_eq!(loader.status(), LoadStatus::Failed);
        assert!(scene.background().is_none());
        assert!(scene.environment().is_none());
        // Stays failed; no retry.
        assert!(!loader.install_into(&mut scene));
        assert_eq!(loader.status(), LoadStatus::Failed);
    }
}
