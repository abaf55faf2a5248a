pub mod configuration;

pub mod dataset {
    pub mod datasetlayout;
    pub mod antennacurrent;
}

pub mod figure {
    pub mod figurestyle;
}

pub mod math {
    pub mod number;
    pub mod metrics;

    pub mod curve {
        pub mod curve;
        pub mod curveerror;
        pub mod nonparametriccurve {
            pub mod nonparametriccurve;
            pub mod piecewisepolynomial;
        }
        pub mod nonparametricsurface {
            pub mod bicubicspline;
        }
    }

    pub mod differentiation {
        pub mod differentiationerror;
        pub mod centraldifference;
        pub mod holoborodko;
    }

    pub mod integration {
        pub mod quadratureerror;
        pub mod gausslegendre;
        pub mod elementwise;
    }
}
