//! Error function and its inverse.
//!
//! Both are evaluated through piecewise rational approximations whose
//! coefficients are precise to double precision. Each interval stores a
//! constant offset `Y` together with numerator and denominator polynomials,
//! the result on that interval being `Y + P(x) / Q(x)` for a suitably shifted
//! argument `x`.

#![expect(
    clippy::excessive_precision,
    reason = "coefficients keep their published digits"
)]

use crate::util::float_ext::FloatExt;

/// Rational approximation on a single interval.
struct Rational<const P: usize, const Q: usize> {
    y: f64,
    p: [f64; P],
    q: [f64; Q],
}

impl<const P: usize, const Q: usize> Rational<P, Q> {
    fn ratio(&self, x: f64) -> f64 {
        evaluate_polynomial(x, &self.p) / evaluate_polynomial(x, &self.q)
    }
}

/// Horner's scheme with coefficients in ascending order.
fn evaluate_polynomial(x: f64, coefficients: &[f64]) -> f64 {
    coefficients
        .iter()
        .rev()
        .fold(0.0, |sum, coefficient| sum * x + coefficient)
}

// Polynomials for erf on [0, 0.5]
const ERF_0_05: Rational<5, 5> = Rational {
    y: 1.044948577880859375,
    p: [
        0.0834305892146531832907,
        -0.338165134459360935041,
        -0.0509990735146777432841,
        -0.00772758345802133288487,
        -0.000322780120964605683831,
    ],
    q: [
        1.0,
        0.455004033050794024546,
        0.0875222600142252549554,
        0.00858571925074406212772,
        0.000370900071787748000569,
    ],
};

// Polynomials for erfc on [0.5, 1.5]
const ERFC_05_15: Rational<6, 7> = Rational {
    y: 0.405935764312744140625,
    p: [
        -0.098090592216281240205,
        0.178114665841120341155,
        0.191003695796775433986,
        0.0888900368967884466578,
        0.0195049001251218801359,
        0.00180424538297014223957,
    ],
    q: [
        1.0,
        1.84759070983002217845,
        1.42628004845511324508,
        0.578052804889902404909,
        0.12385097467900864233,
        0.0113385233577001411017,
        0.337511472483094676155e-5,
    ],
};

// Polynomials for erfc on [1.5, 2.5]
const ERFC_15_25: Rational<6, 6> = Rational {
    y: 0.50672817230224609375,
    p: [
        -0.0243500476207698441272,
        0.0386540375035707201728,
        0.04394818964209516296,
        0.0175679436311802092299,
        0.00323962406290842133584,
        0.000235839115596880717416,
    ],
    q: [
        1.0,
        1.53991494948552447182,
        0.982403709157920235114,
        0.325732924782444448493,
        0.0563921837420478160373,
        0.00410369723978904575884,
    ],
};

// Polynomials for erfc on [2.5, 4.5]
const ERFC_25_45: Rational<6, 6> = Rational {
    y: 0.5405750274658203125,
    p: [
        0.00295276716530971662634,
        0.0137384425896355332126,
        0.00840807615555585383007,
        0.00212825620914618649141,
        0.000250269961544794627958,
        0.113212406648847561139e-4,
    ],
    q: [
        1.0,
        1.04217814166938418171,
        0.442597659481563127003,
        0.0958492726301061423444,
        0.0105982906484876531489,
        0.000479411269521714493907,
    ],
};

// Polynomials for erfc on [4.5, 28], evaluated at 1/z
const ERFC_45_INF: Rational<7, 7> = Rational {
    y: 0.5579090118408203125,
    p: [
        0.00628057170626964891937,
        0.0175389834052493308818,
        -0.212652252872804219852,
        -0.687717681153649930619,
        -2.5518551727311523996,
        -3.22729451764143718517,
        -2.8175401114513378771,
    ],
    q: [
        1.0,
        2.79257750980575282228,
        11.0567237927800161565,
        15.930646027911794143,
        22.9367376522880577224,
        13.5064170191802889145,
        5.48409182238641741584,
    ],
};

// Polynomials for erf_inv with p in [0, 0.5]
const ERF_INV_0_05: Rational<8, 10> = Rational {
    y: 0.0891314744949340820313,
    p: [
        -0.000508781949658280665617,
        -0.00836874819741736770379,
        0.0334806625409744615033,
        -0.0126926147662974029034,
        -0.0365637971411762664006,
        0.0219878681111168899165,
        0.00822687874676915743155,
        -0.00538772965071242932965,
    ],
    q: [
        1.0,
        -0.970005043303290640362,
        -1.56574558234175846809,
        1.56221558398423026363,
        0.662328840472002992063,
        -0.71228902341542847553,
        -0.0527396382340099713954,
        0.0795283687341571680018,
        -0.00233393759374190016776,
        0.000886216390456424707504,
    ],
};

// Polynomials for erf_inv with q = 1 - p in [0.25, 0.5]
const ERF_INV_05_075: Rational<9, 9> = Rational {
    y: 2.249481201171875,
    p: [
        -0.202433508355938759655,
        0.105264680699391713268,
        8.37050328343119927838,
        17.6447298408374015486,
        -18.8510648058714251895,
        -44.6382324441786960818,
        17.445385985570866523,
        21.1294655448340526258,
        -3.67192254707729348546,
    ],
    q: [
        1.0,
        6.24264124854247537712,
        3.9713437953343869095,
        -28.6608180499800029974,
        -20.1432634680485188801,
        48.5609213108739935468,
        10.8268667355460159008,
        -22.6436933413139721736,
        1.72114765761200282724,
    ],
};

// Polynomials for erf_inv with x = sqrt(-ln(q)) in [0, 3]
const ERF_INV_TAIL_3: Rational<11, 8> = Rational {
    y: 0.807220458984375,
    p: [
        -0.131102781679951906451,
        -0.163794047193317060787,
        0.117030156341995252019,
        0.387079738972604337464,
        0.337785538912035898924,
        0.142869534408157156766,
        0.0290157910005329060432,
        0.00214558995388805277169,
        -0.679465575181126350155e-6,
        0.285225331782217055858e-7,
        -0.681149956853776992068e-9,
    ],
    q: [
        1.0,
        3.46625407242567245975,
        5.38168345707006855425,
        4.77846592945843778382,
        2.59301921623620271374,
        0.848854343457902036425,
        0.152264338295331783612,
        0.01105924229346489121,
    ],
};

// Polynomials for erf_inv with x in [3, 6]
const ERF_INV_TAIL_6: Rational<9, 7> = Rational {
    y: 0.93995571136474609375,
    p: [
        -0.0350353787183177984712,
        -0.00222426529213447927281,
        0.0185573306514231072324,
        0.00950804701325919603619,
        0.00187123492819559223345,
        0.000157544617424960554631,
        0.460469890584317994083e-5,
        -0.230404776911882601748e-9,
        0.266339227425782031962e-11,
    ],
    q: [
        1.0,
        1.3653349817554063097,
        0.762059164553623404043,
        0.220091105764131249824,
        0.0341589143670947727934,
        0.00263861676657015992959,
        0.764675292302794483503e-4,
    ],
};

// Polynomials for erf_inv with x in [6, 18]
const ERF_INV_TAIL_18: Rational<9, 7> = Rational {
    y: 0.98362827301025390625,
    p: [
        -0.0167431005076633737133,
        -0.00112951438745580278863,
        0.00105628862152492910091,
        0.000209386317487588078668,
        0.149624783758342370182e-4,
        0.449696789927706453732e-6,
        0.462596163522878599135e-8,
        -0.281128735628831791805e-13,
        0.99055709973310326855e-16,
    ],
    q: [
        1.0,
        0.591429344886417493481,
        0.138151865749083321638,
        0.0160746087093676504695,
        0.000964011807005165528527,
        0.275335474764726041141e-4,
        0.282243172016108031869e-6,
    ],
};

// Polynomials for erf_inv with x in [18, 44]
const ERF_INV_TAIL_44: Rational<8, 7> = Rational {
    y: 0.99714565277099609375,
    p: [
        -0.0024978212791898131227,
        -0.779190719229053954292e-5,
        0.254723037413027451751e-4,
        0.162397777342510920873e-5,
        0.396341011304801168516e-7,
        0.411632831190944208473e-9,
        0.145596286718675035587e-11,
        -0.116765012397184275695e-17,
    ],
    q: [
        1.0,
        0.207123112214422517181,
        0.0169410838120975906478,
        0.000690538265622684595676,
        0.145007359818232637924e-4,
        0.144437756628144157666e-6,
        0.509761276599778486139e-9,
    ],
};

// Polynomials for erf_inv with x beyond 44
const ERF_INV_TAIL_INF: Rational<8, 7> = Rational {
    y: 0.99941349029541015625,
    p: [
        -0.000539042911019078575891,
        -0.28398759004727721098e-6,
        0.899465114892291446442e-6,
        0.229345859265920864296e-7,
        0.225561444863500149219e-9,
        0.947846627503022684216e-12,
        0.135880130108924861008e-14,
        -0.348890393399948882918e-21,
    ],
    q: [
        1.0,
        0.0845746234001899436914,
        0.00282092984726264681981,
        0.468292921940894236786e-4,
        0.399968812193862100054e-6,
        0.161809290887904476097e-8,
        0.231558608310259605225e-11,
    ],
};

/// The error function.
///
/// Returns `NaN` only for `NaN` input.
pub fn erf(x: f64) -> f64 {
    if FloatExt::eq(x, 0.0) {
        return 0.0;
    }

    if x.is_nan() {
        return f64::NAN;
    }

    if x.is_infinite() {
        return x.signum();
    }

    erf_imp(x, false)
}

/// The complementary error function `1 - erf(x)`.
pub fn erfc(x: f64) -> f64 {
    if FloatExt::eq(x, 0.0) {
        return 1.0;
    }

    if x.is_nan() {
        return f64::NAN;
    }

    if x.is_infinite() {
        return if x.is_sign_positive() { 0.0 } else { 2.0 };
    }

    erf_imp(x, true)
}

/// The inverse error function.
///
/// Returns `±inf` for `x` at or beyond `±1` and `NaN` for `NaN` input.
pub fn erf_inv(x: f64) -> f64 {
    if x.is_nan() {
        return f64::NAN;
    }

    if FloatExt::eq(x, 0.0) {
        return 0.0;
    }

    if x >= 1.0 {
        return f64::INFINITY;
    }

    if x <= -1.0 {
        return f64::NEG_INFINITY;
    }

    if x < 0.0 {
        -erf_inv_imp(-x, 1.0 + x)
    } else {
        erf_inv_imp(x, 1.0 - x)
    }
}

/// Computes `erf(z)`, or `erfc(z)` if `invert` is set.
fn erf_imp(z: f64, invert: bool) -> f64 {
    if z < 0.0 {
        return if !invert {
            -erf_imp(-z, false)
        } else if z < -0.5 {
            2.0 - erf_imp(-z, true)
        } else {
            1.0 + erf_imp(-z, false)
        };
    }

    let mut invert = invert;

    let result = if z < 0.5 {
        if z < 1e-10 {
            z * 1.125 + z * 0.003379167095512573896158903121545171688
        } else {
            let zz = z * z;

            z * (ERF_0_05.y + ERF_0_05.ratio(zz))
        }
    } else if (invert && z < 28.0) || (!invert && z < 5.8) {
        // Compute erfc and flip afterwards if erf was asked for
        invert = !invert;

        let r = if z < 1.5 {
            ERFC_05_15.y + ERFC_05_15.ratio(z - 0.5)
        } else if z < 2.5 {
            ERFC_15_25.y + ERFC_15_25.ratio(z - 1.5)
        } else if z < 4.5 {
            ERFC_25_45.y + ERFC_25_45.ratio(z - 3.5)
        } else {
            ERFC_45_INF.y + ERFC_45_INF.ratio(z.recip())
        };

        r * f64::exp(-z * z) / z
    } else {
        // erf(z) rounds to 1 and erfc(z) underflows
        invert = !invert;

        0.0
    };

    if invert {
        1.0 - result
    } else {
        result
    }
}

/// Inverse of erf for `p` in `(0, 1)` where `q = 1 - p`.
fn erf_inv_imp(p: f64, q: f64) -> f64 {
    if p <= 0.5 {
        let g = p * (p + 10.0);

        g * ERF_INV_0_05.y + g * ERF_INV_0_05.ratio(p)
    } else if q >= 0.25 {
        let g = f64::sqrt(-2.0 * f64::ln(q));

        g / (ERF_INV_05_075.y + ERF_INV_05_075.ratio(q - 0.25))
    } else {
        let x = f64::sqrt(-f64::ln(q));

        let (y, r) = if x < 3.0 {
            (ERF_INV_TAIL_3.y, ERF_INV_TAIL_3.ratio(x - 1.125))
        } else if x < 6.0 {
            (ERF_INV_TAIL_6.y, ERF_INV_TAIL_6.ratio(x - 3.0))
        } else if x < 18.0 {
            (ERF_INV_TAIL_18.y, ERF_INV_TAIL_18.ratio(x - 6.0))
        } else if x < 44.0 {
            (ERF_INV_TAIL_44.y, ERF_INV_TAIL_44.ratio(x - 18.0))
        } else {
            (ERF_INV_TAIL_INF.y, ERF_INV_TAIL_INF.ratio(x - 44.0))
        };

        y * x + r * x
    }
}
