//! Raw mode makes a single key press end the final-chart wait, and keeps it
//! from being echoed over the chart.

#[cfg(unix)]
mod imp {
    use std::{
        io,
        mem::MaybeUninit,
        os::unix::io::{AsRawFd, RawFd},
    };

    /// Non-canonical, no-echo stdin until dropped.
    pub struct RawModeGuard {
        fd: RawFd,
        saved: libc::termios,
    }

    impl RawModeGuard {
        /// # Errors
        /// stdin is not a terminal or its attributes cannot be changed.
        pub fn enter() -> io::Result<Self> {
            let fd = io::stdin().as_raw_fd();
            let mut t = MaybeUninit::<libc::termios>::uninit();
            // SAFETY: tcgetattr fully initialises `t` when it returns 0.
            let saved = unsafe {
                if libc::tcgetattr(fd, t.as_mut_ptr()) != 0 {
                    return Err(io::Error::last_os_error());
                }
                t.assume_init()
            };

            let mut raw = saved;
            raw.c_lflag &= !(libc::ICANON | libc::ECHO);
            raw.c_cc[libc::VMIN] = 1;
            raw.c_cc[libc::VTIME] = 0;
            // SAFETY: `raw` is a valid termios obtained from tcgetattr.
            if unsafe { libc::tcsetattr(fd, libc::TCSANOW, &raw) } != 0 {
                return Err(io::Error::last_os_error());
            }
            Ok(Self { fd, saved })
        }
    }

    impl Drop for RawModeGuard {
        fn drop(&mut self) {
            // SAFETY: restores the attributes read in `enter`.
            unsafe {
                libc::tcsetattr(self.fd, libc::TCSANOW, &self.saved);
            }
        }
    }
}

#[cfg(not(unix))]
mod imp {
    pub struct RawModeGuard;

    impl RawModeGuard {
        pub fn enter() -> std::io::Result<Self> {
            Ok(Self)
        }
    }
}

pub use imp::RawModeGuard;
