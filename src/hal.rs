//! `embedded-hal` adapter for the board I/O seam.
//!
//! [`EdgeConnector`] implements [`PinIo`] over generic
//! [`OutputPin`] direction pins and [`SetDutyCycle`] PWM pins, so the
//! translator runs on any HAL that exposes the edge-connector pins.
//! The two servo PWM channels must be configured for a 50 Hz frame
//! ([`SERVO_FRAME_US`]); the motor PWM channels may run at any
//! frequency suited to the motor driver.

use embedded_hal::digital::{OutputPin, PinState};
use embedded_hal::pwm::SetDutyCycle;

use crate::commands::{map_range, ANALOG_MAX};
use crate::pins::{AnalogPin, DigitalPin, PinIo};

/// Servo PWM frame in microseconds (50 Hz).
pub const SERVO_FRAME_US: u16 = 20_000;

/// Pulse width commanding 0 degrees.
pub const SERVO_MIN_PULSE_US: u16 = 500;

/// Pulse width commanding 180 degrees.
pub const SERVO_MAX_PULSE_US: u16 = 2_500;

/// Errors surfaced by [`EdgeConnector`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EdgeError {
    /// A direction pin write failed.
    Gpio,
    /// A PWM duty update failed.
    Pwm,
}

impl core::fmt::Display for EdgeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            EdgeError::Gpio => write!(f, "direction pin write failed"),
            EdgeError::Pwm => write!(f, "PWM duty update failed"),
        }
    }
}

/// The six edge-connector outputs the board uses, as `embedded-hal`
/// pins.
pub struct EdgeConnector<M1Dir, M1Pwm, M2Dir, M2Pwm, Sv1, Sv2>
where
    M1Dir: OutputPin,
    M1Pwm: SetDutyCycle,
    M2Dir: OutputPin,
    M2Pwm: SetDutyCycle,
    Sv1: SetDutyCycle,
    Sv2: SetDutyCycle,
{
    m1_dir: M1Dir,
    m1_pwm: M1Pwm,
    m2_dir: M2Dir,
    m2_pwm: M2Pwm,
    servo1: Sv1,
    servo2: Sv2,
}

impl<M1Dir, M1Pwm, M2Dir, M2Pwm, Sv1, Sv2> EdgeConnector<M1Dir, M1Pwm, M2Dir, M2Pwm, Sv1, Sv2>
where
    M1Dir: OutputPin,
    M1Pwm: SetDutyCycle,
    M2Dir: OutputPin,
    M2Pwm: SetDutyCycle,
    Sv1: SetDutyCycle,
    Sv2: SetDutyCycle,
{
    /// Wrap the edge-connector pins. No pin is written until the first
    /// command arrives.
    pub fn new(
        m1_dir: M1Dir,
        m1_pwm: M1Pwm,
        m2_dir: M2Dir,
        m2_pwm: M2Pwm,
        servo1: Sv1,
        servo2: Sv2,
    ) -> Self {
        EdgeConnector {
            m1_dir,
            m1_pwm,
            m2_dir,
            m2_pwm,
            servo1,
            servo2,
        }
    }

    /// Release the underlying pins.
    pub fn free(self) -> (M1Dir, M1Pwm, M2Dir, M2Pwm, Sv1, Sv2) {
        (
            self.m1_dir,
            self.m1_pwm,
            self.m2_dir,
            self.m2_pwm,
            self.servo1,
            self.servo2,
        )
    }
}

/// Rescale a 10-bit analog level to the pin's native duty range.
fn set_analog<P: SetDutyCycle>(pwm: &mut P, level: u16) -> Result<(), EdgeError> {
    let max = u32::from(pwm.max_duty_cycle());
    // `set_duty_cycle` requires duty <= max_duty_cycle.
    let duty = (u32::from(level) * max / u32::from(ANALOG_MAX)).min(max) as u16;
    pwm.set_duty_cycle(duty).map_err(|_| EdgeError::Pwm)
}

/// Express a pulse width as a duty fraction of the 50 Hz servo frame.
fn set_pulse<P: SetDutyCycle>(pwm: &mut P, micros: u16) -> Result<(), EdgeError> {
    let max = u32::from(pwm.max_duty_cycle());
    let duty = (u32::from(micros) * max / u32::from(SERVO_FRAME_US)).min(max) as u16;
    pwm.set_duty_cycle(duty).map_err(|_| EdgeError::Pwm)
}

impl<M1Dir, M1Pwm, M2Dir, M2Pwm, Sv1, Sv2> PinIo
    for EdgeConnector<M1Dir, M1Pwm, M2Dir, M2Pwm, Sv1, Sv2>
where
    M1Dir: OutputPin,
    M1Pwm: SetDutyCycle,
    M2Dir: OutputPin,
    M2Pwm: SetDutyCycle,
    Sv1: SetDutyCycle,
    Sv2: SetDutyCycle,
{
    type Error = EdgeError;

    fn digital_write(&mut self, pin: DigitalPin, level: PinState) -> Result<(), EdgeError> {
        match pin {
            DigitalPin::P8 => self.m1_dir.set_state(level).map_err(|_| EdgeError::Gpio),
            DigitalPin::P12 => self.m2_dir.set_state(level).map_err(|_| EdgeError::Gpio),
        }
    }

    fn analog_write(&mut self, pin: AnalogPin, level: u16) -> Result<(), EdgeError> {
        match pin {
            AnalogPin::P1 => set_analog(&mut self.m1_pwm, level),
            AnalogPin::P2 => set_analog(&mut self.m2_pwm, level),
            AnalogPin::P13 => set_analog(&mut self.servo1, level),
            AnalogPin::P14 => set_analog(&mut self.servo2, level),
        }
    }

    fn servo_write(&mut self, pin: AnalogPin, degrees: u8) -> Result<(), EdgeError> {
        let micros = map_range(
            u32::from(degrees),
            0,
            180,
            u32::from(SERVO_MIN_PULSE_US),
            u32::from(SERVO_MAX_PULSE_US),
        ) as u16;
        self.servo_set_pulse(pin, micros)
    }

    fn servo_set_pulse(&mut self, pin: AnalogPin, micros: u16) -> Result<(), EdgeError> {
        match pin {
            AnalogPin::P1 => set_pulse(&mut self.m1_pwm, micros),
            AnalogPin::P2 => set_pulse(&mut self.m2_pwm, micros),
            AnalogPin::P13 => set_pulse(&mut self.servo1, micros),
            AnalogPin::P14 => set_pulse(&mut self.servo2, micros),
        }
    }
}

#[cfg(test)]
mod tests {
    use core::convert::Infallible;

    use super::*;
    use crate::board::Ibit;
    use crate::commands::{MotorDirection, ServoId};

    #[derive(Debug, Default)]
    struct FakeDir {
        state: Option<PinState>,
    }

    impl embedded_hal::digital::ErrorType for FakeDir {
        type Error = Infallible;
    }

    impl OutputPin for FakeDir {
        fn set_low(&mut self) -> Result<(), Infallible> {
            self.state = Some(PinState::Low);
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Infallible> {
            self.state = Some(PinState::High);
            Ok(())
        }
    }

    #[derive(Debug, Default)]
    struct FakePwm {
        duty: Option<u16>,
    }

    impl embedded_hal::pwm::ErrorType for FakePwm {
        type Error = Infallible;
    }

    impl SetDutyCycle for FakePwm {
        fn max_duty_cycle(&self) -> u16 {
            1023
        }

        fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Infallible> {
            self.duty = Some(duty);
            Ok(())
        }
    }

    #[test]
    fn drive_forward_reaches_the_hal_pins() {
        let mut m1_dir = FakeDir::default();
        let mut m1_pwm = FakePwm::default();
        let mut m2_dir = FakeDir::default();
        let mut m2_pwm = FakePwm::default();
        let mut servo1 = FakePwm::default();
        let mut servo2 = FakePwm::default();

        let connector = EdgeConnector::new(
            &mut m1_dir,
            &mut m1_pwm,
            &mut m2_dir,
            &mut m2_pwm,
            &mut servo1,
            &mut servo2,
        );
        let mut bot = Ibit::new(connector);
        bot.drive(MotorDirection::Forward, 50).unwrap();
        drop(bot);

        assert_eq!(m1_dir.state, Some(PinState::High));
        assert_eq!(m2_dir.state, Some(PinState::Low));
        // The fakes run at a native 10-bit range, so the duty passes
        // through unscaled.
        assert_eq!(m1_pwm.duty, Some(512));
        assert_eq!(m2_pwm.duty, Some(512));
        assert_eq!(servo1.duty, None);
    }

    #[test]
    fn servo_angle_maps_to_the_microbit_pulse_range() {
        let mut servo1 = FakePwm::default();
        let connector = EdgeConnector::new(
            FakeDir::default(),
            FakePwm::default(),
            FakeDir::default(),
            FakePwm::default(),
            &mut servo1,
            FakePwm::default(),
        );
        let mut bot = Ibit::new(connector);
        bot.servo(ServoId::S1, 90).unwrap();
        drop(bot);

        // 90 degrees -> 1500 us of a 20 ms frame -> 1500 * 1023 / 20000.
        assert_eq!(servo1.duty, Some(76));
    }

    #[test]
    fn releasing_a_servo_zeroes_its_duty() {
        let mut servo2 = FakePwm::default();
        let connector = EdgeConnector::new(
            FakeDir::default(),
            FakePwm::default(),
            FakeDir::default(),
            FakePwm::default(),
            FakePwm::default(),
            &mut servo2,
        );
        let mut bot = Ibit::new(connector);
        bot.servo(ServoId::S2, 180).unwrap();
        bot.release_servo(ServoId::S2).unwrap();
        drop(bot);

        assert_eq!(servo2.duty, Some(0));
    }

    #[test]
    fn edge_error_display_names_the_failing_layer() {
        assert_eq!(EdgeError::Gpio.to_string(), "direction pin write failed");
        assert_eq!(EdgeError::Pwm.to_string(), "PWM duty update failed");
    }
}
