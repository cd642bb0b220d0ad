//! Tests for the summary builder
//!
//! Reports are generated in the GROUP output layout so every test can pick its
//! own version, load cases and pile counts.


use std::fmt::Write;

/// Synthetic GROUP report: one load case per entry of `piles`
pub fn sample_report(legacy: bool, piles: &[usize]) -> String {
    let mut out = String::new();
    let w = &mut out;

    let _ = writeln!(w, " ************************************************");
    let _ = writeln!(w, " *   GROUP - ANALYSIS OF A GROUP OF PILES       *");
    if !legacy {
        let _ = writeln!(w, " *   Version 2019.12.5                          *");
    }
    let _ = writeln!(w, " ************************************************");
    let _ = writeln!(w);
    let _ = writeln!(w, " Date: 10/03/2023   Time: 14:22:05");
    let _ = writeln!(w, " COMPUTATION NAME: PIER 4 FOUNDATION");
    let _ = writeln!(w);

    for (index, &count) in piles.iter().enumerate() {
        let case = index + 1;
        let _ = writeln!(w, " LOADING NUMBER {}", case);
        let _ = writeln!(w, "   CASE NAME: SERVICE {}", case);
        let _ = writeln!(w, "   LOAD TYPE: STATIC");
        let _ = writeln!(w);
        let _ = writeln!(w, " * COMPUTED RESULTS AT ORIGIN OF PILE CAP *");
        let _ = writeln!(
            w,
            "   LOADS VERTICAL = 1.2500E+03  HORIZONTAL Y = 5.0000E+01  HORIZONTAL Z = -2.5000E+01"
        );
        let _ = writeln!(
            w,
            "   MOMENTS ABOUT X = 0.0000E+00  ABOUT Y = 1.0000E+02  ABOUT Z = 0.0000E+00"
        );
        let _ = writeln!(
            w,
            "   DISPLACEMENTS VERTICAL = 1.2000D-03  HORIZONTAL Y = 3.4000E-04  HORIZONTAL Z = 0.0000E+00"
        );
        let _ = writeln!(
            w,
            "   ROTATIONS ABOUT X = 0.0000E+00  ABOUT Y = 1.0000E-05  ABOUT Z = 0.0000E+00"
        );
        let _ = writeln!(w);

        let _ = writeln!(w, " * REDUCTION FACTORS FOR LATERAL RESISTANCE *");
        let _ = writeln!(w, "   PILE     RF-Y     RF-Z");
        for pile in 1..=count {
            let _ = writeln!(w, "   {}   0.{}5   0.{}0", pile, pile, pile);
        }
        let _ = writeln!(w);

        let _ = writeln!(w, " * RESULTS IN GLOBAL COORDINATE SYSTEM *");
        let _ = writeln!(w, "   PILE-TOP DISPLACEMENTS");
        let _ = writeln!(w, "   PILE   DISP-X   DISP-Y   DISP-Z   ROT-X   ROT-Y   ROT-Z");
        for pile in 1..=count {
            let _ = writeln!(
                w,
                "   {}   1.{}E-03   2.0E-04   0.0E+00   0.0E+00   1.0E-05   0.0E+00",
                pile, pile
            );
        }
        let _ = writeln!(w, "   PILE-TOP REACTIONS");
        let _ = writeln!(w, "   PILE   FORCE-X   FORCE-Y   FORCE-Z   MOM-X   MOM-Y   MOM-Z");
        for pile in 1..=count {
            let _ = writeln!(
                w,
                "   {}   4.{}E+02   1.0E+01   -5.0E+00   0.0E+00   2.0E+01   0.0E+00",
                pile, pile
            );
        }
        let _ = writeln!(w);

        let _ = writeln!(w, " * RESULTS IN LOCAL COORDINATE SYSTEM *");
        let _ = writeln!(w, "   PILE-TOP DISPLACEMENTS");
        for pile in 1..=count {
            let _ = writeln!(
                w,
                "   {}   1.{}E-03   2.0E-04   0.0E+00   1.0E-05   0.0E+00",
                pile, pile
            );
        }
        let _ = writeln!(w, "   PILE-TOP REACTIONS");
        if legacy {
            for pile in 1..=count {
                let _ = writeln!(
                    w,
                    "   {}   4.{}E+02   1.0E+01   -5.0E+00   0.0E+00   2.0E+01   0.0E+00",
                    pile, pile
                );
            }
        } else {
            let _ = writeln!(w, "   PART 1 - FORCES");
            for pile in 1..=count {
                let _ = writeln!(w, "   {}   4.{}E+02   1.0E+01   -5.0E+00", pile, pile);
            }
            let _ = writeln!(w, "   PART 2 - MOMENTS");
            for pile in 1..=count {
                let _ = writeln!(w, "   {}   0.0E+00   2.{}E+01   0.0E+00", pile, pile);
            }
        }
        let _ = writeln!(w, "   MINIMUM VALUES ALONG PILE");
        for pile in 1..=count {
            let _ = writeln!(w, "   {}   -1.{}E-04   -3.0E+01   -2.0E+00   -1.5E+00", pile, pile);
        }
        let _ = writeln!(w, "   MAXIMUM VALUES ALONG PILE");
        for pile in 1..=count {
            let _ = writeln!(w, "   {}   1.{}E-03   4.5E+01   1.0E+01   3.5E+00", pile, pile);
        }
        let _ = writeln!(w);
    }

    let _ = writeln!(w, " END OF RUN");
    out
}
