//! Feature-report device trait

use crate::HidCommonResult;

/// Blocking access to a HID device through feature reports.
///
/// Implementations acquire the underlying handle on first use and give it
/// back on [`release`](FeatureReportDevice::release). Callers must release
/// at the end of every operation, including failed ones.
pub trait FeatureReportDevice: Send {
    /// Send `data` as a feature report. `data[0]` is the report ID.
    fn write_feature_report(&mut self, data: &[u8]) -> HidCommonResult<usize>;

    /// Read a feature report of up to `len` bytes for `report_id`.
    ///
    /// The returned buffer starts with the report ID byte.
    fn read_feature_report(&mut self, report_id: u8, len: usize) -> HidCommonResult<Vec<u8>>;

    /// Drop the OS handle so another process can open the device.
    fn release(&mut self);

    fn get_device_info(&self) -> &crate::HidDeviceInfo;
}

impl<D: FeatureReportDevice + ?Sized> FeatureReportDevice for Box<D> {
    fn write_feature_report(&mut self, data: &[u8]) -> HidCommonResult<usize> {
        (**self).write_feature_report(data)
    }

    fn read_feature_report(&mut self, report_id: u8, len: usize) -> HidCommonResult<Vec<u8>> {
        (**self).read_feature_report(report_id, len)
    }

    fn release(&mut self) {
        (**self).release()
    }

    fn get_device_info(&self) -> &crate::HidDeviceInfo {
        (**self).get_device_info()
    }
}

pub mod mock {
    use super::*;
    use crate::HidCommonError;
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    /// In-memory device that records every write and serves queued reads.
    ///
    /// Clones share state, so a test can keep one handle for inspection and
    /// hand the other to the code under test.
    #[derive(Clone)]
    pub struct MockFeatureDevice {
        info: crate::HidDeviceInfo,
        read_queue: Arc<Mutex<VecDeque<Vec<u8>>>>,
        write_history: Arc<Mutex<Vec<Vec<u8>>>>,
        read_requests: Arc<Mutex<Vec<(u8, usize)>>>,
        fail_write_at: Arc<Mutex<Option<usize>>>,
        releases: Arc<Mutex<usize>>,
        connected: Arc<Mutex<bool>>,
    }

    impl MockFeatureDevice {
        pub fn new(vendor_id: u16, product_id: u16, path: impl Into<String>) -> Self {
            Self {
                info: crate::HidDeviceInfo::new(vendor_id, product_id, path.into()),
                read_queue: Arc::new(Mutex::new(VecDeque::new())),
                write_history: Arc::new(Mutex::new(Vec::new())),
                read_requests: Arc::new(Mutex::new(Vec::new())),
                fail_write_at: Arc::new(Mutex::new(None)),
                releases: Arc::new(Mutex::new(0)),
                connected: Arc::new(Mutex::new(true)),
            }
        }

        pub fn queue_read(&self, data: Vec<u8>) {
            let mut queue = self.read_queue.lock().unwrap_or_else(|e| e.into_inner());
            queue.push_back(data);
        }

        pub fn get_write_history(&self) -> Vec<Vec<u8>> {
            let history = self.write_history.lock().unwrap_or_else(|e| e.into_inner());
            history.clone()
        }

        /// `(report_id, len)` for every read that reached the device.
        pub fn get_read_requests(&self) -> Vec<(u8, usize)> {
            let requests = self.read_requests.lock().unwrap_or_else(|e| e.into_inner());
            requests.clone()
        }

        /// Make the write with the given zero-based index fail, once.
        ///
        /// Writes before it succeed; the failing write is not recorded and
        /// later writes go through again.
        pub fn fail_write_at(&self, index: usize) {
            let mut slot = self.fail_write_at.lock().unwrap_or_else(|e| e.into_inner());
            *slot = Some(index);
        }

        pub fn release_count(&self) -> usize {
            *self.releases.lock().unwrap_or_else(|e| e.into_inner())
        }

        pub fn disconnect(&self) {
            let mut connected = self.connected.lock().unwrap_or_else(|e| e.into_inner());
            *connected = false;
        }

        pub fn reconnect(&self) {
            let mut connected = self.connected.lock().unwrap_or_else(|e| e.into_inner());
            *connected = true;
        }

        fn is_connected(&self) -> bool {
            *self.connected.lock().unwrap_or_else(|e| e.into_inner())
        }
    }

    impl FeatureReportDevice for MockFeatureDevice {
        fn write_feature_report(&mut self, data: &[u8]) -> HidCommonResult<usize> {
            if !self.is_connected() {
                return Err(HidCommonError::Disconnected);
            }

            let mut history = self.write_history.lock().unwrap_or_else(|e| e.into_inner());
            let mut fail_at = self.fail_write_at.lock().unwrap_or_else(|e| e.into_inner());
            if *fail_at == Some(history.len()) {
                *fail_at = None;
                return Err(HidCommonError::WriteError(format!(
                    "injected failure on write #{}",
                    history.len()
                )));
            }
            history.push(data.to_vec());
            Ok(data.len())
        }

        fn read_feature_report(&mut self, report_id: u8, len: usize) -> HidCommonResult<Vec<u8>> {
            if !self.is_connected() {
                return Err(HidCommonError::Disconnected);
            }

            self.read_requests
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .push((report_id, len));

            let mut queue = self.read_queue.lock().unwrap_or_else(|e| e.into_inner());
            queue
                .pop_front()
                .ok_or_else(|| HidCommonError::ReadError("No data available".to_string()))
        }

        fn release(&mut self) {
            let mut releases = self.releases.lock().unwrap_or_else(|e| e.into_inner());
            *releases = releases.saturating_add(1);
        }

        fn get_device_info(&self) -> &crate::HidDeviceInfo {
            &self.info
        }
    }
}
