macro_rules! config_matrix_pins_stm32 {
    (peripherals: $p:ident, input: [$($in_pin:ident), +], output: [$($out_pin:ident), +]) => {
        {
            let mut output_pins = [$(Output::new($p.$out_pin, Level::Low, Speed::VeryHigh)), +];
            let input_pins = [$(Input::new($p.$in_pin, Pull::Down)), +];
            output_pins.iter_mut().for_each(|p| {
                p.set_low();
            });
            (input_pins, output_pins)
        }
    };
}

/// Create a key action from a KeyCode expression (constant or variant path)
/// Usage:
///   - `kc!(WIN_LOCK)` for constants
///   - `kc!(KeyCode::User0)` for variant names
macro_rules! kc {
    ($k:expr) => {
        rmk::types::action::KeyAction::Single(rmk::types::action::Action::Key($k))
    };
}

/// Lays out one layer in physical reading order, top row first, and places
/// the actions onto the 11x8 switch matrix. The four trailing actions go to
/// the unwired matrix positions the firmware presses itself: layer next,
/// layer previous, Windows key unlock and lock.
#[rustfmt::skip]
macro_rules! gmmk_layout {
    (
        $k13:expr, $k26:expr, $k36:expr, $k31:expr, $k33:expr, $k07:expr, $k63:expr, $k71:expr, $k76:expr, $ka6:expr, $ka7:expr, $ka3:expr, $ka5:expr, $k97:expr, $k01:expr,
        $k16:expr, $k17:expr, $k27:expr, $k37:expr, $k47:expr, $k46:expr, $k56:expr, $k57:expr, $k67:expr, $k77:expr, $k87:expr, $k86:expr, $k66:expr, $ka1:expr, $k65:expr,
        $k11:expr, $k10:expr, $k20:expr, $k30:expr, $k40:expr, $k41:expr, $k51:expr, $k50:expr, $k60:expr, $k70:expr, $k80:expr, $k81:expr, $k61:expr, $ka2:expr, $k15:expr,
        $k21:expr, $k12:expr, $k22:expr, $k32:expr, $k42:expr, $k43:expr, $k53:expr, $k52:expr, $k62:expr, $k72:expr, $k82:expr, $k83:expr, $ka4:expr, $k25:expr,
        $k00:expr, $k14:expr, $k24:expr, $k34:expr, $k44:expr, $k45:expr, $k55:expr, $k54:expr, $k64:expr, $k74:expr, $k85:expr, $k91:expr, $k35:expr, $k75:expr,
        $k06:expr, $k90:expr, $k93:expr, $k94:expr, $k95:expr, $k92:expr, $k04:expr, $k03:expr, $k73:expr, $k05:expr
        ; $next:expr, $prev:expr, $unlock:expr, $lock:expr $(,)?
    ) => {
        [
            [$k00, $k01, $prev, $k03, $k04, $k05, $k06, $k07],
            [$k10, $k11, $k12, $k13, $k14, $k15, $k16, $k17],
            [$k20, $k21, $k22, $next, $k24, $k25, $k26, $k27],
            [$k30, $k31, $k32, $k33, $k34, $k35, $k36, $k37],
            [$k40, $k41, $k42, $k43, $k44, $k45, $k46, $k47],
            [$k50, $k51, $k52, $k53, $k54, $k55, $k56, $k57],
            [$k60, $k61, $k62, $k63, $k64, $k65, $k66, $k67],
            [$k70, $k71, $k72, $k73, $k74, $k75, $k76, $k77],
            [$k80, $k81, $k82, $k83, $unlock, $k85, $k86, $k87],
            [$k90, $k91, $k92, $k93, $k94, $k95, $lock, $k97],
            [rmk::a!(No), $ka1, $ka2, $ka3, $ka4, $ka5, $ka6, $ka7],
        ]
    };
}
