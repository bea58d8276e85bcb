//! FFI interface for the host scheduling driver.
//!
//! The host owns the frame loop and feeds elapsed time through
//! `gl_driver_tick`. Grid queries and toggles go through the state pointer
//! returned by `gl_driver_state`.

use std::ffi::{c_char, CStr};
use std::time::Duration;

use super::stepping::{write_layout, write_updates, GlCellUpdate};
use crate::automaton::LifeDriver;
use crate::config::LifeConfig;
use crate::state::LifeState;

/// Create a stopped driver around a new, empty grid.
/// Returns a pointer to the allocated LifeDriver.
#[no_mangle]
pub extern "C" fn gl_create_driver(
    width: i32,
    height: i32,
    tick_interval_ms: u64,
    num_threads: u8,
) -> *mut LifeDriver {
    let driver = LifeDriver::new(
        LifeState::new(width, height),
        Duration::from_millis(tick_interval_ms),
        num_threads,
    );
    Box::into_raw(Box::new(driver))
}

/// Create a stopped driver from a TOML config file. Grid, simulation,
/// schedule and presentation sections all apply.
///
/// # Safety
/// - `path` must be a valid NUL-terminated string, or null
///
/// # Returns
/// A pointer to the allocated LifeDriver, or null if the path is null or the
/// config cannot be loaded.
#[no_mangle]
pub unsafe extern "C" fn gl_create_driver_from_config(path: *const c_char) -> *mut LifeDriver {
    if path.is_null() {
        return std::ptr::null_mut();
    }

    let Ok(path) = CStr::from_ptr(path).to_str() else {
        tracing::warn!("config path is not valid UTF-8");
        return std::ptr::null_mut();
    };

    match LifeConfig::load(path) {
        Ok(config) => Box::into_raw(Box::new(LifeDriver::from_config(&config))),
        Err(err) => {
            tracing::warn!("failed to load {path}: {err}");
            std::ptr::null_mut()
        }
    }
}

/// Destroy a driver and the grid it owns.
/// Safe to call with null pointer (no-op).
///
/// # Safety
/// - `driver` must be a pointer returned by `gl_create_driver()`, or null
/// - neither `driver` nor its state pointer may be used after this call
#[no_mangle]
pub unsafe extern "C" fn gl_destroy_driver(driver: *mut LifeDriver) {
    if !driver.is_null() {
        drop(Box::from_raw(driver));
    }
}

/// Borrow the driver's grid for use with the other `gl_*` functions.
/// The pointer stays valid until the driver is destroyed; never pass it to `gl_destroy`.
///
/// # Safety
/// - `driver` must be a valid LifeDriver pointer, or null
#[no_mangle]
pub unsafe extern "C" fn gl_driver_state(driver: *mut LifeDriver) -> *mut LifeState {
    if driver.is_null() {
        return std::ptr::null_mut();
    }
    &mut (*driver).state
}

/// Start advancing and write refresh records for every cell.
///
/// # Safety
/// - `driver` must be a valid LifeDriver pointer, or null
/// - `out_buf` must be valid for `capacity` writes, or null
/// - `out_total` must be valid for a write, or null
///
/// # Returns
/// 0 on success, 1 on null pointer.
#[no_mangle]
pub unsafe extern "C" fn gl_driver_start(
    driver: *mut LifeDriver,
    out_buf: *mut GlCellUpdate,
    capacity: usize,
    out_total: *mut u64,
) -> i32 {
    if driver.is_null() {
        return 1;
    }

    let driver = &mut *driver;
    let refresh = driver.start();
    write_updates(&driver.state, &refresh, out_buf, capacity, out_total);
    0
}

/// Stop advancing.
///
/// # Safety
/// - `driver` must be a valid LifeDriver pointer, or null
#[no_mangle]
pub unsafe extern "C" fn gl_driver_stop(driver: *mut LifeDriver) {
    if driver.is_null() {
        return;
    }
    (*driver).stop();
}

/// Returns 1 if running, 0 if stopped, -1 if null pointer.
///
/// # Safety
/// - `driver` must be a valid LifeDriver pointer, or null
#[no_mangle]
pub unsafe extern "C" fn gl_driver_is_active(driver: *const LifeDriver) -> i32 {
    if driver.is_null() {
        return -1;
    }
    i32::from((*driver).is_active())
}

/// Feed elapsed host time (microseconds) and advance the generations it covers.
/// Refresh records for the union of changed cells are written to `out_buf`.
///
/// # Safety
/// - `driver` must be a valid LifeDriver pointer, or null
/// - `out_buf` must be valid for `capacity` writes, or null
/// - `out_total` must be valid for a write, or null
///
/// # Returns
/// Number of generations advanced, or -1 if null pointer.
#[no_mangle]
pub unsafe extern "C" fn gl_driver_tick(
    driver: *mut LifeDriver,
    elapsed_us: u64,
    out_buf: *mut GlCellUpdate,
    capacity: usize,
    out_total: *mut u64,
) -> i32 {
    if driver.is_null() {
        return -1;
    }

    let driver = &mut *driver;
    let report = driver.tick(Duration::from_micros(elapsed_us));
    write_updates(&driver.state, &report.changed, out_buf, capacity, out_total);
    report.generations as i32
}

/// Writes instance origins in instance-index order, spaced by the configured cell step.
///
/// # Safety
/// - `driver` must be a valid LifeDriver pointer, or null
/// - `out_buf` must be valid for `capacity` writes, or null
///
/// # Returns
/// Total number of instances (may exceed `capacity`), or 0 on null pointer.
#[no_mangle]
pub unsafe extern "C" fn gl_driver_instance_layout(
    driver: *const LifeDriver,
    out_buf: *mut [f32; 3],
    capacity: usize,
) -> u64 {
    if driver.is_null() {
        return 0;
    }

    let driver = &*driver;
    write_layout(&driver.instance_layout(), out_buf, capacity)
}
